//! Default values shared by the config structs.

pub const DEFAULT_ATTRIBUTE_VALUE: &str = "0";
pub const DEFAULT_ATTRIBUTE_LABEL: &str = "Not specified";
pub const DEFAULT_MISSING_LABEL: &str = "";
pub const DEFAULT_RELATION_SEPARATOR: &str = ", ";

/// Fully specified name description type.
pub const FSN_TYPE_ID: &str = "900000000000003001";

/// Concept inactivation indicator attribute value reference set.
pub const CONCEPT_INACTIVATION_REFSET_ID: &str = "900000000000489007";

/// Historical association reference sets.
pub const HISTORICAL_ASSOCIATION_REFSET_IDS: [&str; 12] = [
    "900000000000531004", // REFERS TO
    "900000000000530003", // ALTERNATIVE
    "900000000000529008", // SIMILAR TO
    "900000000000528000", // WAS A
    "900000000000527005", // SAME AS
    "900000000000526001", // REPLACED BY
    "900000000000525002", // MOVED FROM
    "900000000000524003", // MOVED TO
    "900000000000523009", // POSSIBLY EQUIVALENT TO
    "900000000000522004", // Historical association reference set (parent)
    "1186924009",         // PARTIALLY EQUIVALENT TO
    "1186921001",         // POSSIBLY REPLACED BY
];

pub const ASSOCIATION_LABEL_SUFFIX: &str =
    "association reference set (foundation metadata concept)";

/// Effective time of the first RF2 release. Every legacy concept carries it,
/// so it says nothing about when a concept was actually created.
pub const INITIAL_RELEASE_TIME: u32 = 20020131;
