//! Transaction categorization
//!
//! Two backends behind the [`Categorize`] trait: a multinomial naive-Bayes
//! classifier trained on merchant descriptions, and a keyword rule table.
//! The default [`Categorizer`] stacks them: the model answers when it is
//! confident, the rules answer when it is not, and `Other` is the floor.
//! The same description always maps to the same category.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::Category;

/// Posterior mass below which the model abstains and rules take over
const MIN_CONFIDENCE: f64 = 0.55;

/// Environment variable naming the classifier artifact path
pub const MODEL_PATH_ENV: &str = "WRAPPED_MODEL_PATH";

/// Maps a merchant description to a spending category
pub trait Categorize: Send + Sync {
    fn categorize(&self, description: &str) -> Category;
}

/// Break a description into classifier tokens
fn tokenize(description: &str) -> Vec<String> {
    description
        .to_uppercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= 2 && !t.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Rule backend
// ---------------------------------------------------------------------------

/// Keyword rules for well-known Indian merchants
pub struct RuleCategorizer {
    rules: Vec<(&'static str, Category)>,
}

impl RuleCategorizer {
    pub fn new() -> Self {
        // First match wins; more specific names come before generic words
        let rules = vec![
            ("SWIGGY", Category::Dining),
            ("ZOMATO", Category::Dining),
            ("STARBUCKS", Category::Dining),
            ("DOMINOS", Category::Dining),
            ("MCDONALD", Category::Dining),
            ("BIGBASKET", Category::Groceries),
            ("BLINKIT", Category::Groceries),
            ("ZEPTO", Category::Groceries),
            ("DMART", Category::Groceries),
            ("RELIANCE FRESH", Category::Groceries),
            ("AMAZON", Category::Shopping),
            ("FLIPKART", Category::Shopping),
            ("MYNTRA", Category::Shopping),
            ("AJIO", Category::Shopping),
            ("UBER", Category::Travel),
            ("OLA", Category::Travel),
            ("IRCTC", Category::Travel),
            ("INDIGO", Category::Travel),
            ("MAKEMYTRIP", Category::Travel),
            ("AIR INDIA", Category::Travel),
            ("NETFLIX", Category::Bills),
            ("SPOTIFY", Category::Bills),
            ("AIRTEL", Category::Bills),
            ("JIO", Category::Bills),
            ("VODAFONE", Category::Bills),
            ("ELECTRICITY", Category::Bills),
            ("APOLLO PHARMACY", Category::Health),
            ("PHARMEASY", Category::Health),
            ("1MG", Category::Health),
            ("PRACTO", Category::Health),
            ("ANNUAL FEE", Category::Fees),
            ("LATE FEE", Category::Fees),
            ("INTEREST CHARGE", Category::Fees),
        ];
        Self { rules }
    }
}

impl Default for RuleCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Categorize for RuleCategorizer {
    fn categorize(&self, description: &str) -> Category {
        let upper = description.to_uppercase();
        self.rules
            .iter()
            .find(|(kw, _)| upper.contains(kw))
            .map(|(_, c)| *c)
            .unwrap_or(Category::Other)
    }
}

// ---------------------------------------------------------------------------
// Naive-Bayes backend
// ---------------------------------------------------------------------------

/// Multinomial naive-Bayes model over description tokens
///
/// The trained artifact serializes to JSON so a model fitted elsewhere (or
/// refitted on corrected data) can be dropped in without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    classes: Vec<Category>,
    vocabulary: HashMap<String, usize>,
    class_log_prior: Vec<f64>,
    /// Per class, per vocabulary index
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayesModel {
    /// Fit a model from labelled descriptions with Laplace smoothing
    pub fn train(examples: &[(&str, Category)]) -> Self {
        let mut classes: Vec<Category> = Vec::new();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();

        for (desc, cat) in examples {
            if !classes.contains(cat) {
                classes.push(*cat);
            }
            for token in tokenize(desc) {
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }

        let vocab_size = vocabulary.len();
        let mut class_counts = vec![0usize; classes.len()];
        let mut token_counts = vec![vec![0usize; vocab_size]; classes.len()];

        for (desc, cat) in examples {
            let ci = classes.iter().position(|c| c == cat).unwrap_or(0);
            class_counts[ci] += 1;
            for token in tokenize(desc) {
                if let Some(&ti) = vocabulary.get(&token) {
                    token_counts[ci][ti] += 1;
                }
            }
        }

        let total = examples.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&c| (c as f64 / total).ln())
            .collect();

        let feature_log_prob = token_counts
            .iter()
            .map(|counts| {
                let class_total: usize = counts.iter().sum();
                let denom = (class_total + vocab_size) as f64;
                counts
                    .iter()
                    .map(|&c| ((c + 1) as f64 / denom).ln())
                    .collect()
            })
            .collect();

        Self {
            classes,
            vocabulary,
            class_log_prior,
            feature_log_prob,
        }
    }

    /// Predict a category with its normalized posterior probability
    ///
    /// Returns `None` when no token of the description is in the vocabulary,
    /// so unseen merchants fall through instead of inheriting the prior.
    pub fn predict(&self, description: &str) -> Option<(Category, f64)> {
        let tokens = tokenize(description);
        let known: Vec<usize> = tokens
            .iter()
            .filter_map(|t| self.vocabulary.get(t).copied())
            .collect();
        if known.is_empty() || self.classes.is_empty() {
            return None;
        }

        let log_posteriors: Vec<f64> = (0..self.classes.len())
            .map(|ci| {
                self.class_log_prior[ci]
                    + known
                        .iter()
                        .map(|&ti| self.feature_log_prob[ci][ti])
                        .sum::<f64>()
            })
            .collect();

        // Log-sum-exp normalization for a usable confidence
        let max = log_posteriors.iter().cloned().fold(f64::MIN, f64::max);
        let sum: f64 = log_posteriors.iter().map(|lp| (lp - max).exp()).sum();

        let (best, best_lp) = log_posteriors
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

        Some((self.classes[best], (best_lp - max).exp() / sum))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Seed training set of Indian merchant descriptions
fn seed_examples() -> Vec<(&'static str, Category)> {
    vec![
        ("UBER TRIP BANGALORE", Category::Travel),
        ("UBER AUTO", Category::Travel),
        ("OLA CABS MUMBAI", Category::Travel),
        ("IRCTC RAIL TICKET", Category::Travel),
        ("INDIGO AIRLINES DEL", Category::Travel),
        ("MAKEMYTRIP HOTELS", Category::Travel),
        ("SWIGGY ORDER BANGALORE", Category::Dining),
        ("SWIGGY INSTAMART FOOD", Category::Dining),
        ("ZOMATO ONLINE ORDER", Category::Dining),
        ("STARBUCKS COFFEE MUMBAI", Category::Dining),
        ("DOMINOS PIZZA DELHI", Category::Dining),
        ("BIGBASKET GROCERIES", Category::Groceries),
        ("BLINKIT QUICK COMMERCE", Category::Groceries),
        ("DMART AVENUE SUPERMARTS", Category::Groceries),
        ("ZEPTO MARKETPLACE", Category::Groceries),
        ("AMAZON RETAIL IN", Category::Shopping),
        ("AMAZON PAY INDIA", Category::Shopping),
        ("FLIPKART INTERNET PVT", Category::Shopping),
        ("MYNTRA DESIGNS FASHION", Category::Shopping),
        ("NETFLIX SUBSCRIPTION", Category::Bills),
        ("AIRTEL POSTPAID BILL", Category::Bills),
        ("JIO RECHARGE PREPAID", Category::Bills),
        ("SPOTIFY PREMIUM", Category::Bills),
        ("APOLLO PHARMACY CHENNAI", Category::Health),
        ("PHARMEASY MEDICINES", Category::Health),
        ("1MG HEALTHCARE ORDER", Category::Health),
        ("ATM WITHDRAWAL", Category::Other),
        ("ATM CASH", Category::Other),
    ]
}

// ---------------------------------------------------------------------------
// Stacked default
// ---------------------------------------------------------------------------

/// The production categorizer: model first, rules as fallback
pub struct Categorizer {
    model: NaiveBayesModel,
    rules: RuleCategorizer,
}

impl Categorizer {
    /// Build with the seed-trained model
    pub fn new() -> Self {
        Self {
            model: NaiveBayesModel::train(&seed_examples()),
            rules: RuleCategorizer::new(),
        }
    }

    /// Load a model artifact from disk. When the file does not exist, the
    /// seed-trained model is written there so later runs start from the
    /// same artifact.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let model = if path.exists() {
            let model = NaiveBayesModel::load(path)?;
            info!(path = %path.display(), "loaded classifier artifact");
            model
        } else {
            let model = NaiveBayesModel::train(&seed_examples());
            if let Err(e) = model.save(path) {
                warn!(path = %path.display(), error = %e, "failed to write classifier artifact");
            }
            model
        };
        Ok(Self {
            model,
            rules: RuleCategorizer::new(),
        })
    }

    /// Build from the artifact named by WRAPPED_MODEL_PATH, falling back to
    /// the seed-trained model when unset or unreadable
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
            if !path.is_empty() {
                match Self::load_or_default(Path::new(&path)) {
                    Ok(categorizer) => return categorizer,
                    Err(e) => {
                        warn!(path = %path, error = %e, "failed to load classifier artifact, using seed model");
                    }
                }
            }
        }
        Self::new()
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Categorize for Categorizer {
    fn categorize(&self, description: &str) -> Category {
        if let Some((category, confidence)) = self.model.predict(description) {
            if confidence >= MIN_CONFIDENCE {
                return category;
            }
        }
        self.rules.categorize(description)
    }
}
