//! # Display Formatting Tests
//!
//! Covers recipe-exact fraction rendering and the shopping-rounded metric
//! and imperial equivalents, including the never-round-down guarantee.

#[cfg(test)]
mod tests {
    use groceries::display_format::{format_recipe_quantity, format_shopping_equivalents};
    use groceries::unit_conversion::{to_grams, to_milliliters};

    #[test]
    fn test_recipe_fractions() {
        assert_eq!(format_recipe_quantity(1.5), "1 ½");
        assert_eq!(format_recipe_quantity(0.333), "⅓");
        assert_eq!(format_recipe_quantity(2.0), "2");
        assert_eq!(format_recipe_quantity(0.75), "¾");
        assert_eq!(format_recipe_quantity(3.667), "3 ⅔");
    }

    #[test]
    fn test_non_convertible_unit_display() {
        let eq = format_shopping_equivalents(1.0, "bunch");
        assert_eq!(eq.display, "1 bunch");
        assert_eq!(eq.metric, "1 bunch");
        assert_eq!(eq.imperial, None);
    }

    #[test]
    fn test_unknown_unit_preserves_casing() {
        let eq = format_shopping_equivalents(2.0, "Sprigs");
        assert_eq!(eq.display, "2 Sprigs");
        assert_eq!(eq.imperial, None);
    }

    #[test]
    fn test_convertible_units_get_both_equivalents() {
        let eq = format_shopping_equivalents(2.0, "cup");
        assert_eq!(eq.metric, "475 ml");
        assert_eq!(eq.imperial.as_deref(), Some("16 fl oz"));

        let eq = format_shopping_equivalents(1.0, "pound");
        assert_eq!(eq.metric, "455 g");
        assert_eq!(eq.imperial.as_deref(), Some("1 lb"));
    }

    /// Parse the leading number out of a rendered equivalent like "475 ml"
    fn leading_number(rendered: &str) -> f64 {
        rendered
            .split_whitespace()
            .next()
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_metric_volume_never_rounds_down() {
        for quantity in [0.25, 0.5, 1.0, 1.3, 2.0, 3.7, 4.2] {
            let eq = format_shopping_equivalents(quantity, "cup");
            let true_ml = to_milliliters(quantity, "cup").unwrap();
            let metric = leading_number(&eq.metric);
            let metric_ml = if eq.metric.ends_with("L") {
                metric * 1000.0
            } else {
                metric
            };
            assert!(
                metric_ml >= true_ml - 1e-6,
                "{quantity} cup: metric {metric_ml} ml below true {true_ml} ml"
            );
        }
    }

    #[test]
    fn test_metric_weight_never_rounds_down() {
        for (quantity, unit) in [(0.5, "pound"), (3.0, "pound"), (750.0, "gram"), (1.2, "kg")] {
            let eq = format_shopping_equivalents(quantity, unit);
            let true_g = to_grams(quantity, unit).unwrap();
            let metric = leading_number(&eq.metric);
            let metric_g = if eq.metric.ends_with("kg") {
                metric * 1000.0
            } else {
                metric
            };
            assert!(
                metric_g >= true_g - 1e-6,
                "{quantity} {unit}: metric {metric_g} g below true {true_g} g"
            );
        }
    }

    #[test]
    fn test_imperial_weight_switches_to_pounds() {
        let eq = format_shopping_equivalents(450.0, "gram");
        assert_eq!(eq.imperial.as_deref(), Some("16 oz"));

        let eq = format_shopping_equivalents(500.0, "gram");
        assert_eq!(eq.imperial.as_deref(), Some("2 lb"));
    }

    #[test]
    fn test_metric_volume_switches_to_liters() {
        let eq = format_shopping_equivalents(5.0, "cup");
        // 1182.94 ml crosses the liter threshold, ceiling at tenths
        assert_eq!(eq.metric, "1.2 L");
    }
}
