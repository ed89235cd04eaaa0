//! Meal photo analysis: label filtering against the recognized food terms.

use vision_client::ImageLabel;

/// Food terms recognized in vision labels, including common Singaporean dishes.
pub const FOOD_TERMS: &[&str] = &[
    "apple",
    "banana",
    "orange",
    "pizza",
    "burger",
    "sandwich",
    "salad",
    "pasta",
    "bread",
    "cake",
    "cookie",
    "chocolate",
    "ice cream",
    "fish",
    "meat",
    "chicken",
    "beef",
    "pork",
    "egg",
    "cheese",
    "milk",
    "yogurt",
    "rice",
    "sushi",
    "noodles",
    "soup",
    "potato",
    "fries",
    "vegetable",
    "fruit",
    "chicken rice",
    "durian",
    "laksa",
    "char kway teow",
    "hainanese chicken rice",
    "roti prata",
    "chilli crab",
    "satay",
    "nasi lemak",
    "hokkien mee",
    "bak kut teh",
    "kaya toast",
    "mee goreng",
    "rojak",
    "popiah",
];

/// Keeps the labels whose description is a recognized food term (case-insensitive exact
/// match), preserving label order.
pub fn filter_food_labels(labels: &[ImageLabel]) -> Vec<String> {
    labels
        .iter()
        .filter(|label| {
            let lower = label.description.to_lowercase();
            FOOD_TERMS.iter().any(|term| *term == lower)
        })
        .map(|label| label.description.clone())
        .collect()
}

/// Outcome of the photo analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum MealAnalysis {
    /// Recognized foods (joined list) plus the generated advice.
    Advice { foods: String, advice: String },
    /// No whitelist term matched; no advice call was made.
    NoFood,
    /// The vision or advice call failed or timed out.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(description: &str) -> ImageLabel {
        ImageLabel {
            description: description.to_string(),
            score: 0.9,
        }
    }

    #[test]
    fn keeps_food_labels_in_order() {
        let labels = vec![label("Pizza"), label("Tableware"), label("Salad")];
        assert_eq!(filter_food_labels(&labels), vec!["Pizza", "Salad"]);
    }

    #[test]
    fn match_is_case_insensitive_but_exact() {
        let labels = vec![label("RICE"), label("Fried rice"), label("Ice cream")];
        // "Fried rice" is not in the term list; substring matches do not count.
        assert_eq!(filter_food_labels(&labels), vec!["RICE", "Ice cream"]);
    }

    #[test]
    fn no_food_labels_yields_empty() {
        let labels = vec![label("Table"), label("Fork"), label("Person")];
        assert!(filter_food_labels(&labels).is_empty());
    }
}
