//! Presentational helpers derived from an IQ: advice lines and population
//! comparison.
//!
//! Texts are the product's French copy, kept as static resource tables so the
//! selection logic stays separate from the wording.

use crate::model::{PopulationComparison, TestLevel};

use super::IqEstimator;

/// Advice bands, descending: (minimum IQ, three advice lines)
const ADVICE_BANDS: [(i32, [&str; 3]); 4] = [
    (
        130,
        [
            "🎓 Votre intelligence est exceptionnelle ! Considérez des défis intellectuels avancés.",
            "📚 Vous pourriez exceller dans la recherche, l'innovation ou les domaines créatifs complexes.",
            "🤝 Utilisez vos capacités pour aider les autres et résoudre des problèmes sociaux.",
        ],
    ),
    (
        120,
        [
            "🌟 Vous avez une intelligence remarquable ! Explorez des sujets complexes.",
            "💼 Vous êtes bien adapté(e) aux professions intellectuelles exigeantes.",
            "🎯 Fixez-vous des objectifs ambitieux et continuez à apprendre.",
        ],
    ),
    (
        110,
        [
            "📈 Votre intelligence est au-dessus de la moyenne ! Continuez à vous challenger.",
            "🎨 Explorez différents domaines pour découvrir vos talents cachés.",
            "📖 La lecture régulière peut encore enrichir vos capacités.",
        ],
    ),
    (
        90,
        [
            "✅ Votre intelligence est dans la moyenne normale. C'est parfaitement bien !",
            "🏋️‍♂️ Exercez régulièrement votre cerveau avec des puzzles et jeux de logique.",
            "🎪 Diversifiez vos activités mentales pour stimuler différentes capacités.",
        ],
    ),
];

/// Advice below the lowest band
const DEVELOPMENT_ADVICE: [&str; 3] = [
    "💪 Votre potentiel peut être développé ! L'intelligence n'est pas figée.",
    "🧩 Pratiquez régulièrement des exercices de logique et de réflexion.",
    "🎵 Essayez différentes activités : musique, art, sport pour stimuler votre cerveau.",
];

const SHORT_TEST_ADVICE: &str =
    "⏰ Refaites le test complet pour une évaluation plus précise de votre IQ.";
const FULL_TEST_ADVICE: &str = "🎯 Ce résultat basé sur le test complet est très fiable.";

/// Ordered advice lines for an IQ: three lines for its band, then one line
/// about the test level for `short` and `full` tests.
#[must_use]
pub fn personalized_advice(iq: i32, test_level: TestLevel) -> Vec<String> {
    let band = ADVICE_BANDS
        .iter()
        .find(|(min_iq, _)| iq >= *min_iq)
        .map_or(&DEVELOPMENT_ADVICE, |(_, lines)| lines);

    let mut advice: Vec<String> = band.iter().map(|line| (*line).to_string()).collect();
    match test_level {
        TestLevel::Short => advice.push(SHORT_TEST_ADVICE.to_string()),
        TestLevel::Full => advice.push(FULL_TEST_ADVICE.to_string()),
        TestLevel::Standard => {}
    }
    advice
}

impl IqEstimator {
    /// Advice lines for `iq`; see [`personalized_advice`]
    #[must_use]
    pub fn personalized_advice(&self, iq: i32, test_level: TestLevel) -> Vec<String> {
        personalized_advice(iq, test_level)
    }

    /// Share of the population scoring below and above `iq`
    #[must_use]
    pub fn population_comparison(&self, iq: i32) -> PopulationComparison {
        let percentile = self.percentile(iq);
        let better_than = percentile.round() as i32;
        let worse_than = (100.0 - percentile).round() as i32;

        PopulationComparison {
            better_than,
            worse_than,
            description: format!(
                "Vous avez un score supérieur à {better_than}% de la population"
            ),
        }
    }
}
