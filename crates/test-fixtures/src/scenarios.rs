//! Small datasets with known answers.

use termdelta_core::models::RawRow;

use crate::rows::{association, attribute, entity, label};

pub const REPLACED_BY: &str = "900000000000526001";
pub const SAME_AS: &str = "900000000000527005";
pub const ASSOCIATION_SUFFIX: &str = "association reference set (foundation metadata concept)";

/// Active then inactive: one inactivation at 20210101.
pub fn simple_inactivation() -> Vec<RawRow> {
    vec![entity("E1", 20200101, true), entity("E1", 20210101, false)]
}

/// Reason R1 applies at 20210101; R2 comes later.
pub fn reason_history() -> Vec<RawRow> {
    vec![
        attribute("E1", "m1", 20191231, true, "R1"),
        attribute("E1", "m2", 20210601, true, "R2"),
    ]
}

/// Only an inactive reason row before 20210101.
pub fn inactive_reason_only() -> Vec<RawRow> {
    vec![attribute("E1", "m1", 20200601, false, "R1")]
}

/// Two active rows at the same time; the second carries `term = "second"`.
pub fn duplicate_timestamp() -> Vec<RawRow> {
    vec![
        label("E2", "E2", 20220101, true, "first"),
        label("E2", "E2", 20220101, true, "second"),
    ]
}

/// One active row only.
pub fn single_active() -> Vec<RawRow> {
    vec![entity("E5", 20230101, true)]
}

/// A small release history touching every engine feature.
///
/// | concept | history                         | at event time                          |
/// |---------|---------------------------------|----------------------------------------|
/// | 100     | active 2002, inactive 2021      | reason 900000000000482003, 2 links     |
/// | 200     | active 2020, inactive 2022      | no reason, no links                    |
/// | 300     | inactive 2002, active 2023      | never inactivated                      |
/// | 400     | active 2002 only                | unchanged                              |
pub struct Release {
    pub concepts: Vec<RawRow>,
    pub labels: Vec<RawRow>,
    pub reasons: Vec<RawRow>,
    pub associations: Vec<RawRow>,
}

pub fn release() -> Release {
    let concepts = vec![
        entity("100", 20020131, true),
        entity("100", 20210131, false),
        entity("200", 20200131, true),
        entity("200", 20220131, false),
        entity("300", 20020131, false),
        entity("300", 20230131, true),
        entity("400", 20020131, true),
    ];
    let labels = vec![
        label("100", "1001", 20020131, true, "Old hundred (disorder)"),
        label("100", "1001", 20200131, true, "Hundred (disorder)"),
        label("200", "2001", 20200131, true, "Two hundred (finding)"),
        label("300", "3001", 20230131, true, "Three hundred (procedure)"),
        label("400", "4001", 20020131, true, "Four hundred (disorder)"),
        label("400", "4001", 20190131, true, "Four hundred v2 (disorder)"),
        label("400", "4002", 20220131, true, "Four hundred v3 (disorder)"),
        label("900000000000482003", "9001", 20020131, true, "Duplicate (foundation metadata concept)"),
        label(REPLACED_BY, "9002", 20020131, true, &format!("REPLACED BY {ASSOCIATION_SUFFIX}")),
        label(SAME_AS, "9003", 20020131, true, &format!("SAME AS {ASSOCIATION_SUFFIX}")),
    ];
    let reasons = vec![attribute("100", "r1", 20210131, true, "900000000000482003")];
    let associations = vec![
        association("100", "a1", 20210131, true, REPLACED_BY, "400"),
        association("100", "a2", 20210131, true, SAME_AS, "200"),
        association("100", "a3", 20240131, true, REPLACED_BY, "300"),
    ];
    Release {
        concepts,
        labels,
        reasons,
        associations,
    }
}
