//! Building tiles and their payment rules.

use serde::{Deserialize, Serialize};

use crate::cards::check_selection;
use crate::core::{ConfigurationError, PurchaseError, ResourceKind, Resources};

/// What a building costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingRule {
    /// Exactly these resources.
    Certain { required: Resources },

    /// `total` materials drawn from at least `variety` different kinds.
    Flex { total: u32, variety: u32 },
}

/// A building tile.
///
/// ```
/// use stone_age::buildings::Building;
/// use stone_age::core::{ResourceKind, Resources};
///
/// let hut = Building::certain(&[ResourceKind::Wood, ResourceKind::Wood, ResourceKind::Clay]);
/// let held = Resources::from_pairs([(ResourceKind::Wood, 2), (ResourceKind::Clay, 1)]);
/// assert!(hut.is_able_to_buy(&held));
/// assert_eq!(hut.validate_payment(&held, &held), Ok(11));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Building {
    pub rule: BuildingRule,
}

impl Building {
    /// A building requiring one unit of each listed kind.
    #[must_use]
    pub fn certain(required: &[ResourceKind]) -> Self {
        Self {
            rule: BuildingRule::Certain {
                required: Resources::from_pairs(required.iter().map(|&kind| (kind, 1))),
            },
        }
    }

    /// A building requiring an exact resource bundle.
    #[must_use]
    pub const fn certain_bundle(required: Resources) -> Self {
        Self {
            rule: BuildingRule::Certain { required },
        }
    }

    /// A flexible building.
    #[must_use]
    pub const fn flex(total: u32, variety: u32) -> Self {
        Self {
            rule: BuildingRule::Flex { total, variety },
        }
    }

    /// Whether `held` can pay for the building.
    #[must_use]
    pub fn is_able_to_buy(&self, held: &Resources) -> bool {
        match self.rule {
            BuildingRule::Certain { required } => held.contains(&required),
            BuildingRule::Flex { total, variety } => {
                held.material_variety() >= variety && held.material_total() >= total
            }
        }
    }

    /// Check a payment and return the points it is worth.
    ///
    /// A certain building accepts only its exact requirement. A flexible one
    /// accepts any held material selection of exactly `total` units covering
    /// at least `variety` kinds.
    pub fn validate_payment(
        &self,
        held: &Resources,
        payment: &Resources,
    ) -> Result<u32, PurchaseError> {
        if !self.is_able_to_buy(held) {
            return Err(PurchaseError::CannotAfford {
                needed: self.units(),
                held: held.material_total(),
            });
        }
        check_selection(held, payment)?;

        match self.rule {
            BuildingRule::Certain { required } => {
                if *payment != required {
                    return Err(PurchaseError::SelectionOutsideOptions(format!(
                        "{payment:?} for a building requiring {required:?}"
                    )));
                }
            }
            BuildingRule::Flex { total, variety } => {
                let selected = payment.total();
                if selected != total {
                    return Err(PurchaseError::SelectionTotalMismatch {
                        selected,
                        required: total,
                    });
                }
                let kinds = payment.material_variety();
                if kinds < variety {
                    return Err(PurchaseError::InsufficientVariety {
                        selected: kinds,
                        required: variety,
                    });
                }
            }
        }

        Ok(payment.building_value())
    }

    /// Units of material the building takes.
    #[must_use]
    pub fn units(&self) -> u32 {
        match self.rule {
            BuildingRule::Certain { required } => required.total(),
            BuildingRule::Flex { total, .. } => total,
        }
    }

    /// Fixed-width numeric description.
    ///
    /// Certain: the values of the lowest three required units, ascending,
    /// zero padded. Flex: `[total, variety, 0]`.
    #[must_use]
    pub fn descriptor(&self) -> [u32; 3] {
        match self.rule {
            BuildingRule::Certain { required } => {
                let mut out = [0; 3];
                let values = required
                    .iter()
                    .flat_map(|(kind, count)| std::iter::repeat(kind.value()).take(count as usize));
                for (slot, value) in out.iter_mut().zip(values) {
                    *slot = value;
                }
                out
            }
            BuildingRule::Flex { total, variety } => [total, variety, 0],
        }
    }

    /// Reject tiles no player could ever pay for.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.rule {
            BuildingRule::Certain { required } => {
                if required.get(ResourceKind::Food) > 0 || required.total() == 0 {
                    return Err(ConfigurationError::MalformedDeck(format!(
                        "certain building requires {required:?}"
                    )));
                }
            }
            BuildingRule::Flex { total, variety } => {
                let kinds = ResourceKind::MATERIALS.len() as u32;
                if total == 0 || variety == 0 || variety > total || variety > kinds {
                    return Err(ConfigurationError::MalformedDeck(format!(
                        "flex building needs {total} from {variety} kinds"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ResourceKind::*;

    #[test]
    fn test_certain_building() {
        let building = Building::certain_bundle(Resources::from_pairs([(Wood, 3), (Stone, 2)]));

        let short = Resources::from_pairs([(Wood, 3), (Stone, 1), (Gold, 4)]);
        assert!(!building.is_able_to_buy(&short));

        let held = Resources::from_pairs([(Wood, 4), (Stone, 2)]);
        assert!(building.is_able_to_buy(&held));
        let required = Resources::from_pairs([(Wood, 3), (Stone, 2)]);
        assert_eq!(building.validate_payment(&held, &required), Ok(3 * 3 + 2 * 4));
        assert!(building.validate_payment(&held, &held).is_err());
    }

    #[test]
    fn test_flex_building_variety() {
        let building = Building::flex(5, 2);

        let single = Resources::new().with(Wood, 5);
        assert!(!building.is_able_to_buy(&single));

        let mixed = Resources::from_pairs([(Wood, 3), (Clay, 2)]);
        assert!(building.is_able_to_buy(&mixed));
        assert_eq!(building.validate_payment(&mixed, &mixed), Ok(3 * 3 + 2 * 5));
    }

    #[test]
    fn test_flex_payment_rules() {
        let building = Building::flex(4, 2);
        let held = Resources::from_pairs([(Wood, 4), (Gold, 2)]);

        assert_eq!(
            building.validate_payment(&held, &Resources::new().with(Wood, 4)),
            Err(PurchaseError::InsufficientVariety {
                selected: 1,
                required: 2
            })
        );
        assert_eq!(
            building.validate_payment(&held, &Resources::from_pairs([(Wood, 2), (Gold, 1)])),
            Err(PurchaseError::SelectionTotalMismatch {
                selected: 3,
                required: 4
            })
        );
        assert_eq!(
            building.validate_payment(&held, &Resources::from_pairs([(Wood, 2), (Gold, 2)])),
            Ok(2 * 3 + 2 * 6)
        );
    }

    #[test]
    fn test_food_is_not_a_material() {
        let building = Building::flex(2, 1);
        let held = Resources::new().with(Food, 10);
        assert!(!building.is_able_to_buy(&held));
    }

    #[test]
    fn test_descriptor() {
        let certain = Building::certain(&[Gold, Wood, Clay]);
        assert_eq!(certain.descriptor(), [3, 5, 6]);
        assert_eq!(Building::flex(5, 2).descriptor(), [5, 2, 0]);
        let big = Building::certain_bundle(Resources::from_pairs([(Wood, 3), (Stone, 2)]));
        assert_eq!(big.descriptor(), [3, 3, 3]);
    }

    #[test]
    fn test_validate() {
        assert!(Building::flex(4, 4).validate().is_ok());
        assert!(Building::flex(4, 5).validate().is_err());
        assert!(Building::flex(2, 3).validate().is_err());
        assert!(Building::certain(&[Food, Wood]).validate().is_err());
    }
}
