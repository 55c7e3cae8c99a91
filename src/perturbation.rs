use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::model::Model;
use crate::SparcedError;

/// An override of one species' initial concentration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Perturbation {
    pub species: String,
    pub value: f64,
}

impl Perturbation {
    pub fn new(species: impl Into<String>, value: f64) -> Self {
        Perturbation {
            species: species.into(),
            value,
        }
    }
}

/// Apply perturbations to the initial states of `model`, in order.
///
/// Nothing is modified if any species is unknown or any value is invalid:
/// a perturbation naming a species the model does not have fails the whole
/// batch with [SparcedError::UnknownSpecies]; it is not skipped.
pub fn apply_perturbations(
    model: &mut dyn Model,
    perturbations: &[Perturbation],
) -> Result<(), SparcedError> {
    let mut x0: Vec<f64> = model.initial_states().iter().copied().collect();
    for perturbation in perturbations {
        let index = model
            .meta()
            .state_index(&perturbation.species)
            .ok_or_else(|| SparcedError::UnknownSpecies(perturbation.species.clone()))?;
        x0[index] = perturbation.value;
    }
    model.set_initial_states(&x0)?;
    tracing::debug!(
        "Applied {} perturbations to {}",
        perturbations.len(),
        model.name()
    );
    Ok(())
}

/// Read perturbations from CSV with a `species,value` header
pub fn read_perturbations<R: Read>(reader: R) -> Result<Vec<Perturbation>, SparcedError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut perturbations = Vec::new();
    for record in reader.deserialize::<Perturbation>() {
        perturbations.push(record?);
    }
    Ok(perturbations)
}

pub fn read_perturbations_file(path: impl AsRef<Path>) -> Result<Vec<Perturbation>, SparcedError> {
    let file = std::fs::File::open(path.as_ref())?;
    read_perturbations(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SparcedTutorial;

    #[test]
    fn applies_in_order() {
        let mut model = SparcedTutorial::new();
        apply_perturbations(
            &mut model,
            &[
                Perturbation::new("EGF", 1.0),
                Perturbation::new("ERK", 100.0),
                Perturbation::new("EGF", 2.0),
            ],
        )
        .unwrap();
        let x0 = model.initial_states();
        assert_eq!(x0[model.meta().state_index("EGF").unwrap()], 2.0);
        assert_eq!(x0[model.meta().state_index("ERK").unwrap()], 100.0);
    }

    #[test]
    fn failures_leave_the_model_untouched() {
        let mut model = SparcedTutorial::new();
        let before = model.initial_states().clone();
        let unknown = apply_perturbations(
            &mut model,
            &[Perturbation::new("EGF", 1.0), Perturbation::new("TNF", 1.0)],
        );
        assert!(matches!(unknown, Err(SparcedError::UnknownSpecies(_))));
        let negative = apply_perturbations(&mut model, &[Perturbation::new("EGF", -1.0)]);
        assert!(matches!(negative, Err(SparcedError::InvalidValue { .. })));
        assert_eq!(model.initial_states(), &before);
    }

    #[test]
    fn reads_csv_tables() {
        let table = "species, value\nEGF, 3.3\nERK,0\n";
        let perturbations = read_perturbations(table.as_bytes()).unwrap();
        assert_eq!(
            perturbations,
            vec![Perturbation::new("EGF", 3.3), Perturbation::new("ERK", 0.0)]
        );

        let malformed = read_perturbations("species,value\nEGF,lots\n".as_bytes());
        assert!(matches!(malformed, Err(SparcedError::Csv(_))));
    }

    #[test]
    fn reads_csv_files() {
        let path = std::env::temp_dir().join(format!(
            "sparced_perturbations_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "species,value\nAKT,60\n").unwrap();
        let perturbations = read_perturbations_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(perturbations, vec![Perturbation::new("AKT", 60.0)]);

        let missing = read_perturbations_file(std::env::temp_dir().join("sparced_missing.csv"));
        assert!(matches!(missing, Err(SparcedError::Io(_))));
    }
}
