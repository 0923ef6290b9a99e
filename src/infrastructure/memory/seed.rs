use anyhow::Result;
use tracing::info;

use crate::domain::{
    entities::plans::PlanEntity,
    repositories::plans::PlanRepository,
    value_objects::{
        enums::{
            currencies::Currency, feature_categories::FeatureCategory,
            limitation_types::{LimitationType, ResetPeriod}, plan_types::PlanType,
        },
        plans::{PlanDraft, PlanFeature, PlanLimitation, PlanMetadata, PlanPricing, TrialPolicy},
    },
};

/// Loads demo plans into the catalog. Called explicitly from the
/// composition root when `SEED_DEMO_DATA=true`; stores never seed
/// themselves.
pub async fn load_demo_plans<P>(plan_repo: &P) -> Result<Vec<PlanEntity>>
where
    P: PlanRepository + Sync,
{
    let drafts = vec![
        demo_plan(
            "Gratuit",
            "Pour découvrir la plateforme",
            PlanType::Free,
            0.0,
            0.0,
            1,
            false,
            50.0,
        ),
        demo_plan(
            "Basique",
            "Pour les petites agences",
            PlanType::Basic,
            29.0,
            290.0,
            2,
            true,
            500.0,
        ),
        demo_plan(
            "Premium",
            "Pour les réseaux multi-agences",
            PlanType::Premium,
            79.0,
            790.0,
            3,
            true,
            5000.0,
        ),
    ];

    let mut plans = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let plan = plan_repo.create(draft).await?;
        info!(plan_id = %plan.id, plan_name = %plan.name, "seed: demo plan loaded");
        plans.push(plan);
    }

    Ok(plans)
}

#[allow(clippy::too_many_arguments)]
fn demo_plan(
    name: &str,
    description: &str,
    plan_type: PlanType,
    monthly: f64,
    yearly: f64,
    display_order: u32,
    trial: bool,
    monthly_packages: f64,
) -> PlanDraft {
    PlanDraft {
        name: name.to_string(),
        description: description.to_string(),
        plan_type,
        status: Default::default(),
        pricing: PlanPricing {
            monthly,
            yearly,
            currency: Currency::Eur,
        },
        features: vec![PlanFeature {
            id: "tracking".to_string(),
            name: "Suivi des colis".to_string(),
            description: String::new(),
            category: FeatureCategory::Core,
            enabled: true,
            unlimited: None,
        }],
        limitations: vec![PlanLimitation {
            id: "packages".to_string(),
            limitation_type: LimitationType::Packages,
            name: "Colis par mois".to_string(),
            value: monthly_packages,
            unit: "colis".to_string(),
            unlimited: false,
            reset_period: Some(ResetPeriod::Monthly),
        }],
        permissions: Vec::new(),
        trial: TrialPolicy {
            enabled: trial,
            duration_days: if trial { 14 } else { 0 },
            unlocked_feature_ids: Vec::new(),
        },
        billing: Default::default(),
        metadata: PlanMetadata {
            popular: display_order == 2,
            display_order,
            ..Default::default()
        },
        created_by: "seed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::plan_store::InMemoryPlanStore;

    #[tokio::test]
    async fn seeds_three_ordered_demo_plans() {
        let store = InMemoryPlanStore::new();

        let plans = load_demo_plans(&store).await.unwrap();
        assert_eq!(plans.len(), 3);

        let listed = store.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gratuit", "Basique", "Premium"]);
    }
}
