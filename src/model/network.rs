use std::any::Any;
use std::collections::HashMap;

use super::{Model, ModelMeta, M, T, V};
use crate::SparcedError;

/// A mass-action reaction with its stoichiometry.
///
/// The flux of a reaction is `k * V * prod(x_i ^ s_i)` over its reactants,
/// in amount per unit time, where `V` is the volume of the compartment the
/// reaction takes place in. Each participating species converts the flux back
/// to a concentration change using the volume of its own compartment.
#[derive(Debug, Clone)]
struct Reaction {
    reactants: Vec<(usize, u32)>,
    products: Vec<(usize, u32)>,
    compartment: usize,
}

/// Equations and values of a compiled signaling network.
///
/// This is the common backbone of every generated SPARCED model: species
/// placed in compartments, one rate constant per reaction, and observables
/// defined as weighted sums of species.
#[derive(Debug, Clone)]
pub struct ReactionNetwork {
    name: String,
    meta: ModelMeta,
    species_compartment: Vec<usize>,
    reactions: Vec<Reaction>,
    observables: Vec<Vec<(usize, T)>>,
    parameters: V,
    volumes: V,
    initial: V,
}

/// Collects the definition of a [ReactionNetwork].
///
/// Names are resolved in [NetworkBuilder::build], so definitions may be given
/// in any order. Reactions are written `"A + B ; C"`; repeating a species on
/// one side raises its stoichiometric coefficient, and either side may be
/// empty for synthesis or degradation.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    name: String,
    compartments: Vec<(String, T)>,
    species: Vec<(String, String, T)>,
    reactions: Vec<(String, String, T, String)>,
    observables: Vec<(String, Vec<(String, T)>)>,
}

impl NetworkBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        NetworkBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn compartment(mut self, id: &str, volume: T) -> Self {
        self.compartments.push((id.to_string(), volume));
        self
    }

    pub fn species(mut self, id: &str, compartment: &str, initial: T) -> Self {
        self.species
            .push((id.to_string(), compartment.to_string(), initial));
        self
    }

    pub fn reaction(mut self, rate_id: &str, equation: &str, rate: T, compartment: &str) -> Self {
        self.reactions.push((
            rate_id.to_string(),
            equation.to_string(),
            rate,
            compartment.to_string(),
        ));
        self
    }

    pub fn observable(mut self, id: &str, terms: &[(&str, T)]) -> Self {
        let terms = terms.iter().map(|(s, w)| (s.to_string(), *w)).collect();
        self.observables.push((id.to_string(), terms));
        self
    }

    pub fn build(self) -> Result<ReactionNetwork, SparcedError> {
        if self.species.is_empty() {
            return Err(SparcedError::Network(format!(
                "model {} defines no species",
                self.name
            )));
        }

        let compartment_index =
            index_ids("compartment", self.compartments.iter().map(|c| c.0.as_str()))?;
        let species_index = index_ids("species", self.species.iter().map(|s| s.0.as_str()))?;
        index_ids("rate constant", self.reactions.iter().map(|r| r.0.as_str()))?;
        index_ids("observable", self.observables.iter().map(|o| o.0.as_str()))?;

        let species_compartment = self
            .species
            .iter()
            .map(|(id, compartment, _)| {
                compartment_index.get(compartment.as_str()).copied().ok_or_else(|| {
                    SparcedError::Network(format!(
                        "species {id} is placed in unknown compartment {compartment}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let reactions = self
            .reactions
            .iter()
            .map(|(id, equation, _, compartment)| {
                let compartment = compartment_index
                    .get(compartment.as_str())
                    .copied()
                    .ok_or_else(|| {
                        SparcedError::Network(format!(
                            "reaction {id} takes place in unknown compartment {compartment}"
                        ))
                    })?;
                let (reactants, products) = parse_equation(equation, &species_index)
                    .map_err(|e| SparcedError::Network(format!("reaction {id}: {e}")))?;
                Ok(Reaction {
                    reactants,
                    products,
                    compartment,
                })
            })
            .collect::<Result<Vec<_>, SparcedError>>()?;

        let observables = self
            .observables
            .iter()
            .map(|(id, terms)| {
                terms
                    .iter()
                    .map(|(species, weight)| {
                        species_index
                            .get(species.as_str())
                            .map(|&i| (i, *weight))
                            .ok_or_else(|| {
                                SparcedError::Network(format!(
                                    "observable {id} refers to unknown species {species}"
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let meta = ModelMeta::new(
            self.species.iter().map(|s| s.0.clone()).collect(),
            self.reactions.iter().map(|r| r.0.clone()).collect(),
            self.compartments.iter().map(|c| c.0.clone()).collect(),
            self.observables.iter().map(|o| o.0.clone()).collect(),
        );

        let volumes: Vec<T> = self.compartments.iter().map(|c| c.1).collect();
        let parameters: Vec<T> = self.reactions.iter().map(|r| r.2).collect();
        let initial: Vec<T> = self.species.iter().map(|s| s.2).collect();
        check_values("volume of", meta.fixed_parameters(), &volumes, true)?;
        check_values("rate constant", meta.parameters(), &parameters, false)?;
        check_values("initial state of", meta.states(), &initial, false)?;

        tracing::debug!(
            "Built reaction network {} with {} species and {} reactions",
            self.name,
            species_compartment.len(),
            reactions.len()
        );

        Ok(ReactionNetwork {
            name: self.name,
            meta,
            species_compartment,
            reactions,
            observables,
            parameters: V::from_vec(parameters),
            volumes: V::from_vec(volumes),
            initial: V::from_vec(initial),
        })
    }
}

impl ReactionNetwork {
    pub fn builder(name: impl Into<String>) -> NetworkBuilder {
        NetworkBuilder::new(name)
    }

    pub fn nreactions(&self) -> usize {
        self.reactions.len()
    }

    /// Reaction fluxes at `x`, in amount per unit time
    pub fn fluxes(&self, x: &V) -> Result<V, SparcedError> {
        check_len("state", self.nx(), x.len())?;
        Ok(V::from_iterator(
            self.reactions.len(),
            self.reactions
                .iter()
                .enumerate()
                .map(|(r, reaction)| self.flux(r, reaction, x)),
        ))
    }

    #[inline(always)]
    fn flux(&self, r: usize, reaction: &Reaction, x: &V) -> T {
        reaction
            .reactants
            .iter()
            .fold(self.rate_scale(r, reaction), |acc, &(i, s)| {
                acc * x[i].powi(s as i32)
            })
    }

    #[inline(always)]
    fn rate_scale(&self, r: usize, reaction: &Reaction) -> T {
        self.parameters[r] * self.volumes[reaction.compartment]
    }

    #[inline(always)]
    fn volume_of(&self, species: usize) -> T {
        self.volumes[self.species_compartment[species]]
    }
}

impl Model for ReactionNetwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    fn parameters(&self) -> &V {
        &self.parameters
    }

    fn set_parameters(&mut self, p: &[T]) -> Result<(), SparcedError> {
        check_len("parameters", self.np(), p.len())?;
        check_values("rate constant", self.meta.parameters(), p, false)?;
        self.parameters = V::from_column_slice(p);
        Ok(())
    }

    fn fixed_parameters(&self) -> &V {
        &self.volumes
    }

    fn set_fixed_parameters(&mut self, k: &[T]) -> Result<(), SparcedError> {
        check_len("fixed parameters", self.nk(), k.len())?;
        check_values("volume of", self.meta.fixed_parameters(), k, true)?;
        self.volumes = V::from_column_slice(k);
        Ok(())
    }

    fn initial_states(&self) -> &V {
        &self.initial
    }

    fn set_initial_states(&mut self, x0: &[T]) -> Result<(), SparcedError> {
        check_len("initial states", self.nx(), x0.len())?;
        check_values("initial state of", self.meta.states(), x0, false)?;
        self.initial = V::from_column_slice(x0);
        Ok(())
    }

    fn rhs(&self, _t: T, x: &V, dx: &mut V) -> Result<(), SparcedError> {
        check_len("state", self.nx(), x.len())?;
        check_len("derivative", self.nx(), dx.len())?;
        dx.fill(0.0);
        for (r, reaction) in self.reactions.iter().enumerate() {
            let flux = self.flux(r, reaction, x);
            for &(i, s) in &reaction.reactants {
                dx[i] -= s as T * flux / self.volume_of(i);
            }
            for &(i, s) in &reaction.products {
                dx[i] += s as T * flux / self.volume_of(i);
            }
        }
        Ok(())
    }

    fn jacobian(&self, _t: T, x: &V, j: &mut M) -> Result<(), SparcedError> {
        let nx = self.nx();
        check_len("state", nx, x.len())?;
        check_len("jacobian rows", nx, j.nrows())?;
        check_len("jacobian columns", nx, j.ncols())?;
        j.fill(0.0);
        for (r, reaction) in self.reactions.iter().enumerate() {
            let scale = self.rate_scale(r, reaction);
            for (a, &(col, sa)) in reaction.reactants.iter().enumerate() {
                // d(flux)/d(x_col)
                let mut d = scale * sa as T * x[col].powi(sa as i32 - 1);
                for (b, &(k, sb)) in reaction.reactants.iter().enumerate() {
                    if a != b {
                        d *= x[k].powi(sb as i32);
                    }
                }
                for &(i, s) in &reaction.reactants {
                    j[(i, col)] -= s as T * d / self.volume_of(i);
                }
                for &(i, s) in &reaction.products {
                    j[(i, col)] += s as T * d / self.volume_of(i);
                }
            }
        }
        Ok(())
    }

    fn observables(&self, _t: T, x: &V, y: &mut V) -> Result<(), SparcedError> {
        check_len("state", self.nx(), x.len())?;
        check_len("observables", self.ny(), y.len())?;
        for (o, terms) in self.observables.iter().enumerate() {
            y[o] = terms.iter().map(|&(i, w)| w * x[i]).sum();
        }
        Ok(())
    }

    fn clone_model(&self) -> Box<dyn Model> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn index_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashMap<&'a str, usize>, SparcedError> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        if id.trim().is_empty() {
            return Err(SparcedError::Network(format!("empty {kind} identifier")));
        }
        if index.insert(id, i).is_some() {
            return Err(SparcedError::Network(format!("duplicate {kind} {id}")));
        }
    }
    Ok(index)
}

type Terms = Vec<(usize, u32)>;

fn parse_equation(
    equation: &str,
    species: &HashMap<&str, usize>,
) -> Result<(Terms, Terms), String> {
    let mut sides = equation.split(';');
    let (Some(lhs), Some(rhs), None) = (sides.next(), sides.next(), sides.next()) else {
        return Err(format!("expected 'reactants ; products', found '{equation}'"));
    };
    let reactants = parse_side(lhs, species)?;
    let products = parse_side(rhs, species)?;
    if reactants.is_empty() && products.is_empty() {
        return Err("no reactants nor products".to_string());
    }
    Ok((reactants, products))
}

fn parse_side(side: &str, species: &HashMap<&str, usize>) -> Result<Terms, String> {
    let mut terms: Terms = Vec::new();
    for name in side.split('+').map(str::trim).filter(|n| !n.is_empty()) {
        let index = *species
            .get(name)
            .ok_or_else(|| format!("unknown species '{name}'"))?;
        match terms.iter_mut().find(|(i, _)| *i == index) {
            Some((_, s)) => *s += 1,
            None => terms.push((index, 1)),
        }
    }
    Ok(terms)
}

#[inline(always)]
fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), SparcedError> {
    if expected != found {
        return Err(SparcedError::dimension(what, expected, found));
    }
    Ok(())
}

fn check_values(
    what: &str,
    ids: &[String],
    values: &[T],
    strictly_positive: bool,
) -> Result<(), SparcedError> {
    for (id, &value) in ids.iter().zip(values) {
        if !value.is_finite() || value < 0.0 || (strictly_positive && value == 0.0) {
            return Err(SparcedError::InvalidValue {
                what: format!("{what} {id}"),
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn binding() -> ReactionNetwork {
        ReactionNetwork::builder("binding")
            .compartment("Extracellular", 4.0)
            .compartment("Cytoplasm", 2.0)
            .species("L", "Extracellular", 3.0)
            .species("R", "Cytoplasm", 1.5)
            .species("LR", "Cytoplasm", 0.0)
            .reaction("kon", "L + R ; LR", 0.7, "Cytoplasm")
            .reaction("koff", "LR ; L + R", 0.2, "Cytoplasm")
            .observable("bound_fraction", &[("LR", 1.0 / 1.5)])
            .build()
            .unwrap()
    }

    #[test]
    fn dimensions_follow_definition() {
        let net = binding();
        assert_eq!(net.nx(), 3);
        assert_eq!(net.np(), 2);
        assert_eq!(net.nk(), 2);
        assert_eq!(net.ny(), 1);
        assert_eq!(net.nreactions(), 2);
        assert_eq!(net.meta().state_index("LR"), Some(2));
    }

    #[test]
    fn rhs_converts_flux_by_compartment_volume() {
        let net = binding();
        let x = V::from_vec(vec![3.0, 1.5, 0.5]);
        let mut dx = V::zeros(3);
        net.rhs(0.0, &x, &mut dx).unwrap();

        let forward = 0.7 * 2.0 * 3.0 * 1.5;
        let backward = 0.2 * 2.0 * 0.5;
        let net_flux = forward - backward;
        assert_relative_eq!(dx[0], -net_flux / 4.0, epsilon = 1e-12);
        assert_relative_eq!(dx[1], -net_flux / 2.0, epsilon = 1e-12);
        assert_relative_eq!(dx[2], net_flux / 2.0, epsilon = 1e-12);

        // Total ligand amount is conserved across compartments
        let ligand_amount = 4.0 * dx[0] + 2.0 * dx[2];
        assert_relative_eq!(ligand_amount, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let net = binding();
        let x = V::from_vec(vec![2.0, 0.8, 0.3]);
        let mut j = M::zeros(3, 3);
        net.jacobian(0.0, &x, &mut j).unwrap();

        let h = 1e-7;
        for col in 0..3 {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[col] += h;
            xm[col] -= h;
            let mut fp = V::zeros(3);
            let mut fm = V::zeros(3);
            net.rhs(0.0, &xp, &mut fp).unwrap();
            net.rhs(0.0, &xm, &mut fm).unwrap();
            for row in 0..3 {
                let fd = (fp[row] - fm[row]) / (2.0 * h);
                assert_relative_eq!(j[(row, col)], fd, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn repeated_species_raise_stoichiometry() {
        let net = ReactionNetwork::builder("dimer")
            .compartment("C", 1.0)
            .species("A", "C", 2.0)
            .species("A2", "C", 0.0)
            .reaction("kd", "A + A ; A2", 0.5, "C")
            .build()
            .unwrap();
        let x = V::from_vec(vec![2.0, 0.0]);
        let mut dx = V::zeros(2);
        net.rhs(0.0, &x, &mut dx).unwrap();
        assert_relative_eq!(dx[0], -2.0 * 0.5 * 4.0);
        assert_relative_eq!(dx[1], 0.5 * 4.0);

        let mut j = M::zeros(2, 2);
        net.jacobian(0.0, &x, &mut j).unwrap();
        assert_relative_eq!(j[(0, 0)], -2.0 * 0.5 * 2.0 * 2.0);
        assert_relative_eq!(j[(1, 0)], 0.5 * 2.0 * 2.0);
    }

    #[test]
    fn synthesis_and_degradation() {
        let net = ReactionNetwork::builder("turnover")
            .compartment("C", 1.0)
            .species("P", "C", 0.0)
            .reaction("ks", " ; P", 3.0, "C")
            .reaction("kdeg", "P ; ", 0.1, "C")
            .build()
            .unwrap();
        let x = V::from_vec(vec![10.0]);
        let mut dx = V::zeros(1);
        net.rhs(0.0, &x, &mut dx).unwrap();
        assert_relative_eq!(dx[0], 3.0 - 1.0);
    }

    #[test]
    fn malformed_equations_are_rejected() {
        let base = || {
            ReactionNetwork::builder("bad")
                .compartment("C", 1.0)
                .species("A", "C", 1.0)
        };
        for equation in ["A", "A ; B", " ; ", "A ; ; A"] {
            let err = base()
                .reaction("k", equation, 1.0, "C")
                .build()
                .unwrap_err();
            assert!(matches!(err, SparcedError::Network(_)), "{equation}");
        }
    }

    #[test]
    fn definition_errors_are_reported() {
        let duplicate = ReactionNetwork::builder("dup")
            .compartment("C", 1.0)
            .species("A", "C", 1.0)
            .species("A", "C", 1.0)
            .build();
        assert!(matches!(duplicate, Err(SparcedError::Network(_))));

        let unknown_compartment = ReactionNetwork::builder("nowhere")
            .species("A", "Golgi", 1.0)
            .build();
        assert!(matches!(unknown_compartment, Err(SparcedError::Network(_))));

        let empty = ReactionNetwork::builder("empty").compartment("C", 1.0).build();
        assert!(matches!(empty, Err(SparcedError::Network(_))));

        let zero_volume = ReactionNetwork::builder("flat")
            .compartment("C", 0.0)
            .species("A", "C", 1.0)
            .build();
        assert!(matches!(
            zero_volume,
            Err(SparcedError::InvalidValue { .. })
        ));
    }

    #[test]
    fn setters_validate_input() {
        let mut net = binding();
        assert!(matches!(
            net.set_parameters(&[1.0]),
            Err(SparcedError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            net.set_parameter_by_id("kon", f64::NAN),
            Err(SparcedError::InvalidValue { .. })
        ));
        assert!(matches!(
            net.set_parameter_by_id("kcat", 1.0),
            Err(SparcedError::UnknownParameter(_))
        ));
        assert!(matches!(
            net.set_initial_state_by_id("R", -1.0),
            Err(SparcedError::InvalidValue { .. })
        ));

        net.set_parameter_by_id("koff", 0.9).unwrap();
        assert_eq!(net.parameters()[1], 0.9);
        net.set_initial_state_by_id("LR", 0.25).unwrap();
        assert_eq!(net.initial_states()[2], 0.25);
    }

    #[test]
    fn observables_are_weighted_sums() {
        let net = binding();
        let x = V::from_vec(vec![0.0, 0.75, 0.75]);
        let mut y = V::zeros(1);
        net.observables(0.0, &x, &mut y).unwrap();
        assert_relative_eq!(y[0], 0.5);

        let mut wrong = V::zeros(2);
        assert!(net.observables(0.0, &x, &mut wrong).is_err());
    }
}
