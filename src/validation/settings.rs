//! Settings validation and settings updates from validated requests

use super::input::validate_non_negative;
use super::requests::{validate_cost_breakdown_request, validate_price_update_request};
use super::result::RecipeValidationResult;
use crate::models::{CostBreakdownRequest, PriceUpdateRequest, RecipeCategory, RecipeSettings};
use chrono::Utc;
use tracing::info;

/// Highest labor rate accepted, in R$ per hour
pub const MAX_LABOR_HOUR_RATE: f64 = 1000.0;

/// Highest margin accepted (9.0 = 900% markup)
pub const MAX_MARGIN: f64 = 9.0;

/// Validate a settings record: labor rate in `[0, 1000]`, every margin in `[0, 9]`.
pub fn validate_recipe_settings(settings: &RecipeSettings) -> RecipeValidationResult {
    let mut result = RecipeValidationResult::new();
    result.check(
        "laborHourRate",
        validate_non_negative("laborHourRate", settings.labor_hour_rate, Some(MAX_LABOR_HOUR_RATE)),
    );
    result.check(
        "defaultMargin",
        validate_non_negative("defaultMargin", settings.default_margin, Some(MAX_MARGIN)),
    );
    for (category, margin) in &settings.margins_by_category {
        result.check(
            format!("marginsByCategory.{}", category),
            validate_non_negative("margin", *margin, Some(MAX_MARGIN)),
        );
    }
    result
}

impl RecipeSettings {
    /// Settings for a single cost breakdown request.
    ///
    /// A request margin replaces the default and every category margin, so the
    /// breakdown uses exactly the margin the caller asked for.
    pub fn with_request_overrides(
        &self,
        request: &CostBreakdownRequest,
    ) -> Result<RecipeSettings, RecipeValidationResult> {
        let result = validate_cost_breakdown_request(request);
        if !result.is_valid {
            return Err(result);
        }
        let mut settings = self.clone();
        if let Some(rate) = request.labor_hour_rate {
            settings.labor_hour_rate = rate;
        }
        if let Some(margin) = request.margin {
            settings.default_margin = margin;
            settings.margins_by_category.clear();
        }
        Ok(settings)
    }
}

/// Merge a price update request into the current settings. Absent fields keep their
/// current values; category margins are merged key by key.
pub fn apply_price_update(
    settings: &RecipeSettings,
    request: &PriceUpdateRequest,
) -> Result<RecipeSettings, RecipeValidationResult> {
    let mut result = validate_price_update_request(request);
    if !result.is_valid {
        return Err(result);
    }

    let mut updated = settings.clone();
    if let Some(rate) = request.labor_hour_rate {
        updated.labor_hour_rate = rate;
    }
    if let Some(margin) = request.default_margin {
        updated.default_margin = margin;
    }
    for (key, margin) in request.margins_by_category.iter().flatten() {
        if let Ok(category) = key.parse::<RecipeCategory>() {
            updated.margins_by_category.insert(category, *margin);
        }
    }

    result.merge(validate_recipe_settings(&updated));
    if !result.is_valid {
        return Err(result);
    }
    updated.updated_at = Utc::now();
    info!(
        labor_hour_rate = updated.labor_hour_rate,
        default_margin = updated.default_margin,
        "pricing settings updated"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;

    #[test]
    fn default_settings_are_valid() {
        assert!(validate_recipe_settings(&RecipeSettings::default()).is_valid);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let settings = RecipeSettings::new(1500.0, 0.5).with_category_margin(RecipeCategory::Cakes, 9.5);
        let result = validate_recipe_settings(&settings);
        assert!(result.has_error_for("laborHourRate"));
        assert!(result.has_error_for("marginsByCategory.cakes"));
        assert!(result.errors.iter().all(|e| e.code == ErrorCode::MaxValue));
    }

    #[test]
    fn request_margin_overrides_category_margins() {
        let request = CostBreakdownRequest {
            recipe_id: Some("rec_1".to_string()),
            labor_hour_rate: Some(60.0),
            margin: Some(0.3),
        };
        let settings = RecipeSettings::default().with_request_overrides(&request).unwrap();
        assert_eq!(settings.labor_hour_rate, 60.0);
        assert_eq!(settings.margin_for(RecipeCategory::Icings), 0.3);
    }

    #[test]
    fn price_update_keeps_absent_fields() {
        let base = RecipeSettings::default();
        let request = PriceUpdateRequest {
            recipe_id: Some("rec_1".to_string()),
            default_margin: Some(0.4),
            margins_by_category: Some([("breads".to_string(), 0.25)].into_iter().collect()),
            ..Default::default()
        };
        let updated = apply_price_update(&base, &request).unwrap();
        assert_eq!(updated.labor_hour_rate, base.labor_hour_rate);
        assert_eq!(updated.default_margin, 0.4);
        assert_eq!(updated.margin_for(RecipeCategory::Breads), 0.25);
        assert_eq!(updated.margin_for(RecipeCategory::Icings), 2.0);
    }

    #[test]
    fn price_update_rejects_margins_above_limit() {
        let request = PriceUpdateRequest {
            recipe_id: Some("rec_1".to_string()),
            default_margin: Some(12.0),
            ..Default::default()
        };
        assert!(apply_price_update(&RecipeSettings::default(), &request).is_err());
    }
}
