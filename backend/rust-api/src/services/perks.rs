//! Perks unlocked by a verified credential. Verifying the credential itself is the
//! identity provider's job; here a credential id only selects a tier.

use crate::models::Perk;

pub const HUMAN_BASIC_DISCOUNT: f64 = 10.0;
pub const VIP_DISCOUNT: f64 = 25.0;

pub fn human_basic_perk() -> Perk {
    Perk {
        id: "human_basic".to_string(),
        title: "Human Verified Access".to_string(),
        description: "10% discount on ticket purchases for verified attendees.".to_string(),
        discount_percent: HUMAN_BASIC_DISCOUNT,
        extra_benefit: Some("Priority entry".to_string()),
    }
}

pub fn vip_perk() -> Perk {
    Perk {
        id: "vip_pass".to_string(),
        title: "VIP Pass".to_string(),
        description: "25% discount + VIP lounge access.".to_string(),
        discount_percent: VIP_DISCOUNT,
        extra_benefit: Some("VIP lounge access".to_string()),
    }
}

/// Perks for a credential id. Ids mentioning "vip" (any case) get the VIP tier.
pub fn perks_for_credential(credential_id: &str) -> Vec<Perk> {
    if credential_id.to_lowercase().contains("vip") {
        vec![vip_perk()]
    } else {
        vec![human_basic_perk()]
    }
}
