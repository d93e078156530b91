//! Emotion-analysis feature vectors.

use cadence_core::models::EmotionAnalysis;

use super::FeatureMatrix;

/// Factor names used throughout the correlation analyzer.
pub const EMOTION_FEATURES: [&str; 5] = ["valence", "arousal", "dominance", "confidence", "time"];

/// One row per analysis: valence, arousal, dominance, confidence, epoch seconds.
pub fn emotion_features(analyses: &[EmotionAnalysis]) -> FeatureMatrix {
    let mut matrix = FeatureMatrix::new(&EMOTION_FEATURES);
    for analysis in analyses {
        matrix.push(
            analysis.id.clone(),
            vec![
                analysis.emotions.valence,
                analysis.emotions.arousal,
                analysis.emotions.dominance,
                analysis.confidence,
                analysis.timestamp.timestamp() as f64,
            ],
        );
    }
    matrix
}
