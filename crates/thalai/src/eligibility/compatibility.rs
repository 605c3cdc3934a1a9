use serde::Serialize;

use super::domain::BloodType;

const Y: bool = true;
const N: bool = false;

/// Red cell transfusion compatibility. Rows are donors, columns recipients,
/// both in `BloodType::ALL` order: A+, A-, B+, B-, AB+, AB-, O+, O-.
const COMPATIBILITY: [[bool; 8]; 8] = [
    //        A+ A- B+ B- AB+ AB- O+ O-
    /* A+  */ [Y, N, N, N, Y, N, N, N],
    /* A-  */ [Y, Y, N, N, Y, Y, N, N],
    /* B+  */ [N, N, Y, N, Y, N, N, N],
    /* B-  */ [N, N, Y, Y, Y, Y, N, N],
    /* AB+ */ [N, N, N, N, Y, N, N, N],
    /* AB- */ [N, N, N, N, Y, Y, N, N],
    /* O+  */ [Y, N, Y, N, Y, N, Y, N],
    /* O-  */ [Y, Y, Y, Y, Y, Y, Y, Y],
];

pub fn blood_type_compatibility(donor: BloodType, recipient: BloodType) -> bool {
    COMPATIBILITY[donor.index()][recipient.index()]
}

/// Donor groups a recipient can safely receive from.
pub fn compatible_donors(recipient: BloodType) -> Vec<BloodType> {
    BloodType::ALL
        .into_iter()
        .filter(|donor| blood_type_compatibility(*donor, recipient))
        .collect()
}

/// Recipient groups a donor can safely give to.
pub fn compatible_recipients(donor: BloodType) -> Vec<BloodType> {
    BloodType::ALL
        .into_iter()
        .filter(|recipient| blood_type_compatibility(donor, *recipient))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityRow {
    pub donor: BloodType,
    pub recipients: Vec<BloodType>,
}

/// Full table keyed by donor group, for rendering and API responses.
pub fn compatibility_matrix() -> Vec<CompatibilityRow> {
    BloodType::ALL
        .into_iter()
        .map(|donor| CompatibilityRow {
            donor,
            recipients: compatible_recipients(donor),
        })
        .collect()
}
