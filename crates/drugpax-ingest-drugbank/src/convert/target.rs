//! Drug-target relationships → controls over protein reactions.

use super::protein::{Chemistry, ProteinBuilder};
use super::report::{ConversionReport, WarningKind};
use super::ConvertConfig;
use crate::record::{KnownAction, Target};
use drugpax_model::{
    hashed_id, Control, ControlType, ElementKind, ElementVariant, Interned, Model, ModelError, Named,
    Names, Role, SmallMolecule,
};

/// Actions that stimulate the target.
///
/// Reactions always model the deactivating direction, so a stimulating drug
/// is recorded as inhibiting that reaction.
const STIMULATING_ACTIONS: [&str; 8] = [
    "substrate",
    "agonist",
    "inducer",
    "potentiator",
    "stimulator",
    "cofactor",
    "activator",
    "ligand",
];

/// Control polarity for a target's action list.
pub fn control_type_for<S: AsRef<str>>(actions: &[S]) -> ControlType {
    for action in actions {
        let action = action.as_ref().trim();
        if STIMULATING_ACTIONS
            .iter()
            .any(|s| action.eq_ignore_ascii_case(s))
        {
            return ControlType::Inhibition;
        }
    }
    ControlType::Activation
}

/// `"<molecule> acts as <a>, <b>"` for targets with a known action.
pub fn control_name(molecule_name: &str, target: &Target) -> Option<String> {
    if target.known_action != KnownAction::Yes || target.actions.is_empty() {
        return None;
    }
    Some(format!(
        "{molecule_name} acts as {}",
        target.actions.join(", ")
    ))
}

pub struct TargetBuilder<'a> {
    proteins: ProteinBuilder<'a>,
}

impl<'a> TargetBuilder<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            proteins: ProteinBuilder::new(config),
        }
    }

    /// Build the control for the `ordinal`-th target of a drug.
    ///
    /// Returns `None` (with a warning) for targets without polypeptides.
    /// `created` is false when an identical control already exists, as for a
    /// drug record repeated in the input.
    pub fn build(
        &self,
        model: &mut Model,
        report: &mut ConversionReport,
        drug: &str,
        molecule_id: &str,
        ordinal: usize,
        target: &Target,
    ) -> Result<Option<Interned>, ModelError> {
        if target.polypeptides.is_empty() {
            let what = target
                .id
                .as_deref()
                .or(target.name.as_deref())
                .unwrap_or("<unnamed target>");
            report.warn(drug, WarningKind::TargetWithoutPolypeptides, what);
            return Ok(None);
        }

        let keys: Vec<String> = target
            .polypeptides
            .iter()
            .map(|p| self.proteins.key(report, drug, p))
            .collect();

        let ordinal = ordinal.to_string();
        let mut parts: Vec<&str> = vec![
            molecule_id,
            ordinal.as_str(),
            target.id.as_deref().unwrap_or(""),
        ];
        parts.extend(keys.iter().map(String::as_str));
        parts.extend(target.actions.iter().map(String::as_str));
        let local = hashed_id(Role::Control, &parts);

        let molecule_name = {
            let molecule = model.get_as::<SmallMolecule>(molecule_id)?;
            molecule.display_name().unwrap_or(molecule_id).to_string()
        };

        let interned = model.get_or_create(ElementKind::Control, &local, |model, id| {
            let chemistry = Chemistry::classify(&target.actions);
            let mut controlled = Vec::with_capacity(target.polypeptides.len());
            for (polypeptide, key) in target.polypeptides.iter().zip(&keys) {
                let reaction = self.proteins.reaction(model, key, polypeptide, chemistry)?;
                if !controlled.contains(&reaction) {
                    controlled.push(reaction);
                }
            }

            let mut control = Control {
                id: id.to_string(),
                names: Names::default(),
                controllers: vec![molecule_id.to_string()],
                controlled,
                control_type: Some(control_type_for(&target.actions)),
            };
            if let Some(name) = control_name(&molecule_name, target) {
                control.set_preferred_name(&name);
            }
            Ok(control.into_element())
        })?;
        Ok(Some(interned))
    }
}
