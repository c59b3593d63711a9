//! Data records: weapons, techniques, armour, tissue, body plans and species

use super::ConfigError;
use crate::agent::{Agent, SpeciesDefinition};
use crate::body::{BodyPartDef, BodyPlan};
use crate::types::AgentId;
use crate::damage::{Technique, Weapon};
use crate::layers::{
    build_armour_stack, build_tissue_stack, ArmourMaterial, ArmourPiece, ArmourStack,
    MaterialLayer, TissueMaterial, TissueTemplate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Tissue thickness ratios may drift this far from 1.0 before a warning
const RATIO_SUM_TOLERANCE: f64 = 0.05;
/// Armour shielding sums above this are suspicious
const SHIELDING_SUM_LIMIT: f64 = 1.5;

/// Raw content file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFile {
    pub weapons: Vec<Weapon>,
    pub techniques: Vec<Technique>,
    pub armour_materials: Vec<ArmourMaterial>,
    pub armour_pieces: Vec<ArmourPiece>,
    pub tissue_materials: Vec<TissueMaterial>,
    pub tissue_templates: Vec<TissueTemplate>,
    pub body_plans: Vec<BodyPlan>,
    pub species: Vec<SpeciesDefinition>,
}

/// Non-fatal findings from validating content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentAudit {
    pub warnings: Vec<String>,
}

/// Validated, id-indexed content
#[derive(Debug, Clone, Default)]
pub struct Content {
    weapons: HashMap<String, Weapon>,
    techniques: HashMap<String, Technique>,
    armour_materials: HashMap<String, ArmourMaterial>,
    armour_pieces: HashMap<String, ArmourPiece>,
    tissue_materials: HashMap<String, TissueMaterial>,
    tissue_templates: HashMap<String, TissueTemplate>,
    body_plans: HashMap<String, BodyPlan>,
    species: HashMap<String, SpeciesDefinition>,
}

fn index<T>(
    kind: &str,
    items: Vec<T>,
    id: impl Fn(&T) -> &str,
) -> Result<HashMap<String, T>, ConfigError> {
    let mut map = HashMap::new();
    for item in items {
        let key = id(&item).to_string();
        if map.contains_key(&key) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate {} id '{}'",
                kind, key
            )));
        }
        map.insert(key, item);
    }
    Ok(map)
}

impl Content {
    /// Index a content file and check its cross-references
    ///
    /// Dangling references are errors. Suspicious values are logged and
    /// returned in the audit.
    pub fn from_file(file: ContentFile) -> Result<(Self, ContentAudit), ConfigError> {
        let content = Content {
            weapons: index("weapon", file.weapons, |w| w.id.as_str())?,
            techniques: index("technique", file.techniques, |t| t.id.as_str())?,
            armour_materials: index("armour material", file.armour_materials, |m| m.id.as_str())?,
            armour_pieces: index("armour piece", file.armour_pieces, |p| p.id.as_str())?,
            tissue_materials: index("tissue material", file.tissue_materials, |m| m.id.as_str())?,
            tissue_templates: index("tissue template", file.tissue_templates, |t| t.id.as_str())?,
            body_plans: index("body plan", file.body_plans, |p| p.id.as_str())?,
            species: index("species", file.species, |s| s.id.as_str())?,
        };
        let audit = content.audit()?;
        Ok((content, audit))
    }

    /// Check references and collect warnings
    pub fn audit(&self) -> Result<ContentAudit, ConfigError> {
        let mut warnings = Vec::new();

        for piece in self.armour_pieces.values() {
            if !self.armour_materials.contains_key(&piece.material) {
                return Err(ConfigError::ValidationError(format!(
                    "armour piece '{}' references unknown material '{}'",
                    piece.id, piece.material
                )));
            }
        }

        for template in self.tissue_templates.values() {
            for layer in &template.layers {
                if !self.tissue_materials.contains_key(&layer.material) {
                    return Err(ConfigError::ValidationError(format!(
                        "tissue template '{}' references unknown material '{}'",
                        template.id, layer.material
                    )));
                }
            }
            let sum = template.ratio_sum();
            if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
                warnings.push(format!(
                    "tissue template '{}' thickness ratios sum to {:.3}",
                    template.id, sum
                ));
            }
        }

        for plan in self.body_plans.values() {
            for part in &plan.parts {
                if !self.tissue_templates.contains_key(&part.tissue) {
                    return Err(ConfigError::ValidationError(format!(
                        "body plan '{}' part '{}' references unknown tissue template '{}'",
                        plan.id, part.name, part.tissue
                    )));
                }
                if let Some(parent) = &part.parent {
                    if plan.index_of(parent).is_none() {
                        return Err(ConfigError::ValidationError(format!(
                            "body plan '{}' part '{}' has unknown parent '{}'",
                            plan.id, part.name, parent
                        )));
                    }
                }
            }
        }

        for species in self.species.values() {
            let Some(plan) = self.body_plans.get(&species.body_plan) else {
                return Err(ConfigError::ValidationError(format!(
                    "species '{}' references unknown body plan '{}'",
                    species.id, species.body_plan
                )));
            };
            for natural in &species.natural_weapons {
                if !self.weapons.contains_key(&natural.weapon_id) {
                    return Err(ConfigError::ValidationError(format!(
                        "species '{}' references unknown natural weapon '{}'",
                        species.id, natural.weapon_id
                    )));
                }
                if !plan.parts.iter().any(|p| p.tag == natural.required_part) {
                    return Err(ConfigError::ValidationError(format!(
                        "species '{}' natural weapon '{}' needs a {:?} that body plan '{}' lacks",
                        species.id, natural.weapon_id, natural.required_part, plan.id
                    )));
                }
            }
            if species.base_blood <= 0.0 || species.base_stamina <= 0.0 {
                warnings.push(format!("species '{}' has an empty blood or stamina pool", species.id));
            }
        }

        for material in self.armour_materials.values() {
            let sum = material.effective_shielding().sum();
            if sum > SHIELDING_SUM_LIMIT {
                warnings.push(format!(
                    "armour material '{}' shielding sums to {:.2}",
                    material.id, sum
                ));
            }
        }

        for weapon in self.weapons.values() {
            if weapon.thrust.is_none() && weapon.swing.is_none() && weapon.ranged.is_none() {
                warnings.push(format!("weapon '{}' has no offensive profile", weapon.id));
            }
        }

        warnings.sort();
        for warning in &warnings {
            warn!("{}", warning);
        }
        Ok(ContentAudit { warnings })
    }

    /// Check that everything an agent carries or declares exists
    pub fn validate_loadout(&self, agent: &Agent) -> Result<(), ConfigError> {
        if let Some(species) = &agent.species {
            if !self.species.contains_key(species) {
                return Err(ConfigError::ValidationError(format!(
                    "{} is of unknown species '{}'",
                    agent.id, species
                )));
            }
        }
        if let Some(weapon) = &agent.weapon {
            if !self.weapons.contains_key(weapon) {
                return Err(ConfigError::ValidationError(format!(
                    "{} wields unknown weapon '{}'",
                    agent.id, weapon
                )));
            }
        }
        for piece in &agent.armour {
            if !self.armour_pieces.contains_key(piece) {
                return Err(ConfigError::ValidationError(format!(
                    "{} wears unknown armour piece '{}'",
                    agent.id, piece
                )));
            }
        }
        let declared = agent
            .defense
            .iter()
            .chain(agent.maneuvers.iter().map(|m| &m.technique_id));
        for technique in declared {
            if !self.techniques.contains_key(technique) {
                return Err(ConfigError::ValidationError(format!(
                    "{} declares unknown technique '{}'",
                    agent.id, technique
                )));
            }
        }
        Ok(())
    }

    // === Lookups ===

    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.get(id)
    }

    pub fn technique(&self, id: &str) -> Option<&Technique> {
        self.techniques.get(id)
    }

    pub fn armour_material(&self, id: &str) -> Option<&ArmourMaterial> {
        self.armour_materials.get(id)
    }

    pub fn armour_piece(&self, id: &str) -> Option<&ArmourPiece> {
        self.armour_pieces.get(id)
    }

    pub fn tissue_material(&self, id: &str) -> Option<&TissueMaterial> {
        self.tissue_materials.get(id)
    }

    pub fn tissue_template(&self, id: &str) -> Option<&TissueTemplate> {
        self.tissue_templates.get(id)
    }

    pub fn body_plan(&self, id: &str) -> Option<&BodyPlan> {
        self.body_plans.get(id)
    }

    pub fn species(&self, id: &str) -> Option<&SpeciesDefinition> {
        self.species.get(id)
    }

    /// A fresh agent of the named species on its body plan
    pub fn spawn(&self, species_id: &str, id: AgentId) -> Option<Agent> {
        let species = self.species(species_id)?;
        let plan = self.body_plan(&species.body_plan)?;
        Some(Agent::from_species(id, species, plan))
    }

    // === Stacks ===

    /// Armour over `part` from the listed pieces; unknown ids are skipped
    pub fn armour_stack(&self, pieces: &[String], part: &BodyPartDef) -> ArmourStack {
        let worn = pieces.iter().filter_map(|id| self.armour_pieces.get(id));
        build_armour_stack(worn, &self.armour_materials, part)
    }

    /// Tissue layers of `part`, sized by its thickness
    pub fn tissue_stack(&self, part: &BodyPartDef) -> Option<Vec<MaterialLayer>> {
        let template = self.tissue_templates.get(&part.tissue)?;
        build_tissue_stack(template, &self.tissue_materials, part.geometry.thickness_cm)
    }
}

/// Load and validate content from a TOML file
pub fn load_content(path: &Path) -> Result<Content, ConfigError> {
    let file: ContentFile = super::load_toml(path)?;
    Content::from_file(file).map(|(content, _)| content)
}

/// Parse and validate content from a TOML string
pub fn parse_content(content: &str) -> Result<Content, ConfigError> {
    let file: ContentFile = super::parse_toml(content)?;
    Content::from_file(file).map(|(content, _)| content)
}

/// Get the shipped content
pub fn default_content() -> Content {
    let toml = include_str!("../../config/content.toml");
    parse_content(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::types::AttackMode;

    const MINIMAL: &str = r#"
[[tissue_materials]]
id = "flesh"

[[tissue_templates]]
id = "lump"
layers = [{ material = "flesh", thickness_ratio = 1.0 }]

[[body_plans]]
id = "blob"
parts = [{ name = "torso", tag = "torso", tissue = "lump", height = "mid" }]
"#;

    #[test]
    fn test_shipped_content_is_valid() {
        let toml = include_str!("../../config/content.toml");
        let file: ContentFile = toml::from_str(toml).unwrap();
        let (content, audit) = Content::from_file(file).unwrap();

        assert!(audit.warnings.is_empty(), "{:?}", audit.warnings);
        assert!(content.body_plan("humanoid").is_some());
        assert!(content.technique("thrust").is_some());
        assert!(content
            .weapon("spear")
            .and_then(|w| w.profile(AttackMode::Thrust))
            .is_some());
    }

    #[test]
    fn test_parse_minimal() {
        let content = parse_content(MINIMAL).unwrap();
        let plan = content.body_plan("blob").unwrap();
        assert_eq!(plan.parts.len(), 1);
        assert!(content.tissue_stack(&plan.parts[0]).is_some());
    }

    #[test]
    fn test_unknown_tissue_template_is_error() {
        let toml = MINIMAL.replace("tissue = \"lump\"", "tissue = \"nothing\"");
        let result = parse_content(&toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_armour_material_is_error() {
        let toml = format!(
            "{}\n{}",
            MINIMAL,
            r#"
[[armour_pieces]]
id = "vest"
name = "Vest"
material = "unobtainium"
coverage = [{ part_tags = ["torso"], layer = "gambeson", totality = "frontal" }]
"#
        );
        let result = parse_content(&toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_id_is_error() {
        let toml = format!("{}\n[[tissue_materials]]\nid = \"flesh\"\n", MINIMAL);
        let result = parse_content(&toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_audit_warnings() {
        let toml = format!(
            "{}\n{}",
            MINIMAL.replace("thickness_ratio = 1.0", "thickness_ratio = 0.7"),
            r#"
[[armour_materials]]
id = "overbuilt"
name = "Overbuilt"
thickness_cm = 1.0
shielding = { deflection = 0.9, absorption = 0.9, dispersion = 0.9 }
"#
        );
        let file: ContentFile = toml::from_str(&toml).unwrap();
        let (_, audit) = Content::from_file(file).unwrap();
        assert_eq!(audit.warnings.len(), 2);
    }

    #[test]
    fn test_species_needs_its_body_plan() {
        let toml = format!(
            "{}\n{}",
            MINIMAL,
            r#"
[[species]]
id = "wisp"
name = "Wisp"
body_plan = "cloud"
base_blood = 1.0
base_stamina = 1.0
base_focus = 1.0
"#
        );
        assert!(matches!(parse_content(&toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_natural_weapon_part_must_exist() {
        let toml = format!(
            "{}\n{}",
            MINIMAL,
            r#"
[[weapons]]
id = "claw"
name = "Claw"

[weapons.swing]
reference_energy = 30.0
geometry_coeff = 0.5
rigidity_coeff = 0.2

[[species]]
id = "blob"
name = "Blob"
body_plan = "blob"
base_blood = 1.0
base_stamina = 1.0
base_focus = 1.0
natural_weapons = [{ weapon_id = "claw", required_part = "hand" }]
"#
        );
        assert!(matches!(parse_content(&toml), Err(ConfigError::ValidationError(_))));
        assert!(parse_content(&toml.replace("required_part = \"hand\"", "required_part = \"torso\"")).is_ok());
    }

    #[test]
    fn test_spawn_uses_species_pools() {
        let content = default_content();
        let dwarf = content.spawn("dwarf", AgentId(3)).unwrap();
        let species = content.species("dwarf").unwrap();

        assert_eq!(dwarf.species.as_deref(), Some("dwarf"));
        assert!((dwarf.resources.max_stamina - species.base_stamina).abs() < f64::EPSILON);
        assert!((dwarf.size.mass - species.size.mass).abs() < f64::EPSILON);
        assert_eq!(dwarf.body.plan().id, species.body_plan);
        assert!(content.validate_loadout(&dwarf).is_ok());
        assert!(content.spawn("dragon", AgentId(4)).is_none());
    }

    #[test]
    fn test_validate_loadout() {
        let content = default_content();
        let plan = content.body_plan("humanoid").unwrap();

        let good = Agent::new(AgentId(1), Body::new(plan))
            .with_weapon("spear")
            .with_armour(["breastplate"]);
        assert!(content.validate_loadout(&good).is_ok());

        let bad = Agent::new(AgentId(2), Body::new(plan)).with_weapon("lightsaber");
        assert!(content.validate_loadout(&bad).is_err());
    }
}
