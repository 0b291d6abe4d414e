//! Report composition: the problem category, the single validation rule,
//! and the deterministic text templates for confirmation and sharing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The problem being reported. Single active value, overwrite semantics.
///
/// Wire values are the user-facing Portuguese labels; `Unset` maps to the
/// empty string, which is what the category picker uses for its
/// placeholder row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCategory {
    #[default]
    Unset,
    WaterLeak,
    WaterOutage,
    SewageBlockage,
    MissedGarbageCollection,
}

impl ProblemCategory {
    pub const ALL: [Self; 5] = [
        Self::Unset,
        Self::WaterLeak,
        Self::WaterOutage,
        Self::SewageBlockage,
        Self::MissedGarbageCollection,
    ];

    /// Value used in composed report text. Empty for `Unset`.
    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::WaterLeak => "Vazamento de água",
            Self::WaterOutage => "Falta de água",
            Self::SewageBlockage => "Esgoto entupido",
            Self::MissedGarbageCollection => "Falta de coleta de lixo",
        }
    }

    /// Label shown in the picker. `Unset` gets the placeholder text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unset => "Selecione o problema",
            other => other.as_value(),
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_value() == value)
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("location and problem category must both be set")]
    EmptyField,
}

/// The only validation rule: both fields must be non-empty.
pub fn validate(location: &str, category: ProblemCategory) -> Result<(), ReportError> {
    if location.is_empty() || !category.is_set() {
        return Err(ReportError::EmptyField);
    }
    Ok(())
}

/// Text shown in the confirmation dialog after a successful report action.
#[must_use]
pub fn compose_confirmation(location: &str, category: ProblemCategory) -> String {
    format!(
        "Localização Inserida: {location}\nProblema: {}",
        category.as_value()
    )
}

/// Text handed to the platform share sheet.
#[must_use]
pub fn compose_share(location: &str, category: ProblemCategory) -> String {
    format!(
        "Estou com um problema na minha região!\nLocalização: {location}\nProblema: {}",
        category.as_value()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn validate_rejects_empty_location() {
        assert_eq!(
            validate("", ProblemCategory::WaterLeak),
            Err(ReportError::EmptyField)
        );
    }

    #[test]
    fn validate_rejects_unset_category() {
        assert_eq!(
            validate("Setor Bueno", ProblemCategory::Unset),
            Err(ReportError::EmptyField)
        );
    }

    #[test]
    fn validate_rejects_both_empty() {
        assert_eq!(
            validate("", ProblemCategory::Unset),
            Err(ReportError::EmptyField)
        );
    }

    #[test]
    fn validate_accepts_both_set() {
        for category in ProblemCategory::ALL {
            if category.is_set() {
                assert_eq!(validate("Setor Bueno", category), Ok(()));
            }
        }
    }

    #[test]
    fn confirmation_template_is_exact() {
        assert_eq!(
            compose_confirmation("Setor Bueno", ProblemCategory::WaterOutage),
            "Localização Inserida: Setor Bueno\nProblema: Falta de água"
        );
    }

    #[test]
    fn share_template_is_exact() {
        assert_eq!(
            compose_share("Setor Bueno", ProblemCategory::WaterLeak),
            "Estou com um problema na minha região!\nLocalização: Setor Bueno\nProblema: Vazamento de água"
        );
    }

    #[test]
    fn category_values_round_trip() {
        for category in ProblemCategory::ALL {
            assert_eq!(ProblemCategory::from_value(category.as_value()), Some(category));
        }
        assert_eq!(ProblemCategory::from_value("Buraco na rua"), None);
    }

    #[test]
    fn unset_label_is_placeholder() {
        assert_eq!(ProblemCategory::Unset.label(), "Selecione o problema");
        assert_eq!(ProblemCategory::Unset.as_value(), "");
        assert_eq!(
            ProblemCategory::SewageBlockage.label(),
            ProblemCategory::SewageBlockage.as_value()
        );
    }

    proptest! {
        #[test]
        fn validate_fails_iff_a_field_is_empty(
            location in "\\PC{0,24}",
            index in 0usize..ProblemCategory::ALL.len(),
        ) {
            let category = ProblemCategory::ALL[index];
            let result = validate(&location, category);
            let should_fail = location.is_empty() || !category.is_set();
            prop_assert_eq!(result.is_err(), should_fail);
        }

        #[test]
        fn composition_is_deterministic(location in "\\PC{0,24}") {
            let category = ProblemCategory::SewageBlockage;
            prop_assert_eq!(
                compose_confirmation(&location, category),
                compose_confirmation(&location, category)
            );
            prop_assert_eq!(
                compose_share(&location, category),
                compose_share(&location, category)
            );
        }
    }
}
