use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::generic_model::instantiate;
use crate::model::Model;
use crate::models::{SparcedExp, SparcedStandard, SparcedTutorial};
use crate::SparcedError;

/// Legacy name under which the standard model was also compiled.
const STANDARD_ALIAS: &str = "SPARCED_I";

/// The model variants linked into this crate.
///
/// Serialized as the model name. Deserialization resolves names with
/// [Variant::from_name].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Variant {
    Tutorial,
    Standard,
    Exp,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Tutorial, Variant::Standard, Variant::Exp];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tutorial => SparcedTutorial::NAME,
            Self::Standard => SparcedStandard::NAME,
            Self::Exp => SparcedExp::NAME,
        }
    }

    /// Number of species of the variant
    pub fn nx(&self) -> usize {
        match self {
            Self::Tutorial => SparcedTutorial::NX,
            Self::Standard => SparcedStandard::NX,
            Self::Exp => SparcedExp::NX,
        }
    }

    /// Resolve a model name.
    ///
    /// Dashes are replaced by underscores before matching, as model names
    /// are used as identifiers of the compiled model.
    pub fn from_name(name: &str) -> Result<Self, SparcedError> {
        let name = sanitize_name(name)?;
        if name == STANDARD_ALIAS {
            tracing::warn!(
                "Model name {} is a legacy alias of {}",
                STANDARD_ALIAS,
                SparcedStandard::NAME
            );
            return Ok(Self::Standard);
        }
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| SparcedError::InvalidModelName {
                reason: format!(
                    "no compiled model with this name, expected one of {}",
                    Self::ALL.map(|v| v.name()).join(", ")
                ),
                name,
            })
    }

    /// Construct a new, independently owned model of this variant
    pub fn instantiate(&self) -> Box<dyn Model> {
        match self {
            Self::Tutorial => instantiate::<SparcedTutorial>(),
            Self::Standard => instantiate::<SparcedStandard>(),
            Self::Exp => instantiate::<SparcedExp>(),
        }
    }

    /// Construct `size` replicate models in parallel, one per simulated cell
    pub fn population(&self, size: usize) -> Vec<Box<dyn Model>> {
        tracing::debug!("Constructing a population of {} {} models", size, self.name());
        (0..size)
            .into_par_iter()
            .map(|_| self.instantiate())
            .collect()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = SparcedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::from_name(s)
    }
}

impl TryFrom<String> for Variant {
    type Error = SparcedError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Variant::from_name(&name)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.name().to_string()
    }
}

/// Normalize a model name: surrounding whitespace is removed and dashes
/// become underscores.
pub fn sanitize_name(name: &str) -> Result<String, SparcedError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SparcedError::EmptyModelName);
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(SparcedError::InvalidModelName {
            name: name.to_string(),
            reason: format!("character '{c}' is not allowed"),
        });
    }
    Ok(name.replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names() {
        assert_eq!(
            Variant::from_name("SPARCED_tutorial").unwrap(),
            Variant::Tutorial
        );
        assert_eq!(Variant::from_name("SPARCED-exp").unwrap(), Variant::Exp);
        assert_eq!(
            " SPARCED_standard ".parse::<Variant>().unwrap(),
            Variant::Standard
        );
        assert_eq!(Variant::from_name("SPARCED_I").unwrap(), Variant::Standard);
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            Variant::from_name("   "),
            Err(SparcedError::EmptyModelName)
        ));
        assert!(matches!(
            Variant::from_name("SPARCED_huge"),
            Err(SparcedError::InvalidModelName { .. })
        ));
        assert!(matches!(
            Variant::from_name("../SPARCED_exp"),
            Err(SparcedError::InvalidModelName { .. })
        ));
    }

    #[test]
    fn names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_name(variant.name()).unwrap(), variant);
            assert_eq!(variant.to_string(), variant.name());
            let model = variant.instantiate();
            assert_eq!(model.name(), variant.name());
            assert_eq!(model.nx(), variant.nx());
        }
    }

    #[test]
    fn serde_uses_model_names() {
        let json = serde_json::to_string(&Variant::Exp).unwrap();
        assert_eq!(json, "\"SPARCED_exp\"");
        let legacy: Variant = serde_json::from_str("\"SPARCED_I\"").unwrap();
        assert_eq!(legacy, Variant::Standard);
    }

    #[test]
    fn serde_resolves_names_like_from_name() {
        let dashed: Variant = serde_json::from_str("\"SPARCED-exp\"").unwrap();
        assert_eq!(dashed, Variant::Exp);
        let padded: Vec<Variant> =
            serde_json::from_str(r#"[" SPARCED_tutorial ", "SPARCED-standard"]"#).unwrap();
        assert_eq!(padded, vec![Variant::Tutorial, Variant::Standard]);

        assert!(serde_json::from_str::<Variant>("\"\"").is_err());
        assert!(serde_json::from_str::<Variant>("\"SPARCED_huge\"").is_err());
    }
}
