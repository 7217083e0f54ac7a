use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Sequence,
    AsRefStr,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Phase {
    Phase0,
    Altair,
    Bellatrix,
}

#[cfg(test)]
mod tests {
    use core::str::FromStr as _;

    use super::*;

    #[test]
    fn phases_are_ordered_by_activation() {
        assert!(Phase::Phase0 < Phase::Altair);
        assert!(Phase::Altair < Phase::Bellatrix);
        assert_eq!(Phase::Bellatrix.previous(), Some(Phase::Altair));
        assert_eq!(Phase::Phase0.previous(), None);
    }

    #[test]
    fn phase_names_parse_case_insensitively() {
        assert_eq!(Phase::from_str("ALTAIR"), Ok(Phase::Altair));
        assert_eq!(Phase::Bellatrix.as_ref(), "bellatrix");
    }
}
