//! Canned health assistant
//!
//! Validates form input, waits for the simulated latency and answers from
//! the fixed response pools. BMI requests are answered immediately.

pub mod profile;
pub mod replies;

pub use profile::{Gender, PatientProfile};
pub use replies::{ChatReply, SymptomAnalysis, TreatmentPlan};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

use crate::bmi::{BmiResult, Measurement};
use crate::errors::{HealthError, Result};
use crate::responses::{
    pick, LatencyProfile, ResponseKind, MEDICAL_DISCLAIMER, SYMPTOM_RECOMMENDATIONS,
    TREATMENT_KEY_POINTS,
};
use crate::telemetry::{Feature, TelemetryCollector, TelemetryEvent};

/// Assistant construction options
#[derive(Debug, Clone, Default)]
pub struct AssistantConfig {
    pub latency: LatencyProfile,
    /// Fixed seed for reproducible reply selection
    pub seed: Option<u64>,
}

impl AssistantConfig {
    /// No delay, optional seed. Used by one-shot commands and tests.
    pub fn instant(seed: Option<u64>) -> Self {
        Self {
            latency: LatencyProfile::instant(),
            seed,
        }
    }
}

/// The canned assistant
pub struct Assistant {
    rng: StdRng,
    latency: LatencyProfile,
    telemetry: TelemetryCollector,
}

impl Assistant {
    pub fn new(config: AssistantConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            latency: config.latency,
            telemetry: TelemetryCollector::new(),
        }
    }

    /// Share an existing collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    /// Answer a free-form health question
    pub async fn chat(&mut self, message: &str) -> Result<ChatReply> {
        let message = self.require_text(Feature::Chat, "message", message, "Please enter a message")?;
        info!(chars = message.len(), "Chat message submitted");

        self.simulate_latency(ResponseKind::Chat).await;
        let answer = pick(ResponseKind::Chat, &mut self.rng).to_string();

        self.telemetry.record(TelemetryEvent::Answered {
            feature: Feature::Chat,
        });

        Ok(ChatReply {
            answer,
            disclaimer: MEDICAL_DISCLAIMER.to_string(),
        })
    }

    /// Produce a canned analysis for the described symptoms
    pub async fn analyze_symptoms(&mut self, symptoms: &str) -> Result<SymptomAnalysis> {
        let symptoms = self.require_text(
            Feature::Prediction,
            "symptoms",
            symptoms,
            "Please describe your symptoms",
        )?;
        info!(symptoms = %symptoms, "Symptoms submitted");

        self.simulate_latency(ResponseKind::Symptoms).await;
        let analysis = pick(ResponseKind::Symptoms, &mut self.rng).to_string();

        self.telemetry.record(TelemetryEvent::Answered {
            feature: Feature::Prediction,
        });

        Ok(SymptomAnalysis {
            symptoms,
            analysis,
            recommendations: SYMPTOM_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            disclaimer: MEDICAL_DISCLAIMER.to_string(),
        })
    }

    /// Produce a canned treatment plan for a validated profile
    pub async fn treatment_plan(&mut self, profile: &PatientProfile) -> Result<TreatmentPlan> {
        info!(
            condition = %profile.condition,
            age = profile.age,
            gender = %profile.gender,
            "Treatment form submitted"
        );

        self.simulate_latency(ResponseKind::Treatment).await;
        let plan = pick(ResponseKind::Treatment, &mut self.rng).to_string();

        self.telemetry.record(TelemetryEvent::Answered {
            feature: Feature::Treatment,
        });

        Ok(TreatmentPlan {
            condition: profile.condition.clone(),
            age: profile.age,
            gender: profile.gender,
            medical_history: profile.medical_history.clone(),
            plan,
            key_points: TREATMENT_KEY_POINTS.iter().map(|s| s.to_string()).collect(),
            disclaimer: MEDICAL_DISCLAIMER.to_string(),
        })
    }

    /// Evaluate BMI. Never delayed.
    pub fn bmi(&self, measurement: &Measurement) -> Result<BmiResult> {
        info!(
            height_cm = measurement.height_cm,
            weight_kg = measurement.weight_kg,
            "BMI calculation"
        );

        match measurement.evaluate() {
            Ok(result) => {
                self.telemetry.record(TelemetryEvent::BmiCalculated {
                    category: result.category,
                });
                Ok(result)
            }
            Err(err) => {
                self.reject(Feature::Analytics, &err);
                Err(err)
            }
        }
    }

    /// Parse raw height/weight text and evaluate
    pub fn bmi_from_text(&self, height: &str, weight: &str) -> Result<BmiResult> {
        let measurement = Measurement::parse(height, weight).map_err(|err| {
            self.reject(Feature::Analytics, &err);
            err
        })?;
        self.bmi(&measurement)
    }

    /// Delay the next reply of `kind` would wait
    fn next_delay(&mut self, kind: ResponseKind) -> Duration {
        self.latency.delay_for(kind, &mut self.rng)
    }

    async fn simulate_latency(&mut self, kind: ResponseKind) {
        let delay = self.next_delay(kind);
        if delay.is_zero() {
            return;
        }
        debug!(kind = %kind, delay_ms = delay.as_millis() as u64, "Simulating response latency");
        tokio::time::sleep(delay).await;
    }

    fn require_text(
        &self,
        feature: Feature,
        field: &str,
        raw: &str,
        prompt: &str,
    ) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            let err = HealthError::invalid_input(field, prompt);
            self.reject(feature, &err);
            return Err(err);
        }
        Ok(trimmed.to_string())
    }

    fn reject(&self, feature: Feature, err: &HealthError) {
        info!(feature = %feature, error = %err, "Input rejected");
        self.telemetry.record(TelemetryEvent::InputRejected { feature });
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(AssistantConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;
    use crate::cli::Verbosity;
    use crate::telemetry::filter_directive;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    fn instant() -> Assistant {
        Assistant::new(AssistantConfig::instant(Some(7)))
    }

    #[tokio::test]
    async fn test_chat_reply_from_pool() {
        let mut assistant = instant();
        let reply = assistant.chat("What are the benefits of exercise?").await.unwrap();
        assert!(ResponseKind::Chat.pool().contains(&reply.answer.as_str()));
        assert!(reply.text().ends_with(MEDICAL_DISCLAIMER));
        assert!(reply.text().contains("\n\n"));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank() {
        let mut assistant = instant();
        let err = assistant.chat("   ").await.unwrap_err();
        assert!(err.is_user_error());
        assert!(err.to_string().contains("Please enter a message"));
        assert_eq!(assistant.telemetry().get_stats().inputs_rejected, 1);
    }

    #[tokio::test]
    async fn test_symptom_analysis() {
        let mut assistant = instant();
        let analysis = assistant
            .analyze_symptoms(" fever, headache, body aches ")
            .await
            .unwrap();
        assert_eq!(analysis.symptoms, "fever, headache, body aches");
        assert_eq!(analysis.recommendations.len(), 5);
        assert!(ResponseKind::Symptoms.pool().contains(&analysis.analysis.as_str()));
    }

    #[tokio::test]
    async fn test_symptom_analysis_rejects_blank() {
        let mut assistant = instant();
        let err = assistant.analyze_symptoms("").await.unwrap_err();
        assert!(err.to_string().contains("describe your symptoms"));
    }

    #[tokio::test]
    async fn test_treatment_plan_echoes_profile() {
        let mut assistant = instant();
        let profile = PatientProfile::new("asthma", 30, Gender::Other, None).unwrap();
        let plan = assistant.treatment_plan(&profile).await.unwrap();
        assert_eq!(plan.condition, "asthma");
        assert_eq!(plan.age, 30);
        assert_eq!(plan.gender, Gender::Other);
        assert_eq!(plan.key_points.len(), 6);
        assert_eq!(plan.disclaimer, MEDICAL_DISCLAIMER);
    }

    #[test]
    fn test_bmi_records_category() {
        let assistant = instant();
        let result = assistant.bmi_from_text("170", "70").unwrap();
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(assistant.telemetry().get_stats().bmi_calculations, 1);
    }

    #[test]
    fn test_bmi_rejects_invalid() {
        let assistant = instant();
        assert!(assistant.bmi_from_text("0", "70").is_err());
        assert!(assistant.bmi_from_text("170", "abc").is_err());
        let stats = assistant.telemetry().get_stats();
        assert_eq!(stats.bmi_calculations, 0);
        assert_eq!(stats.inputs_rejected, 2);
    }

    #[test]
    fn test_seeded_assistants_agree() {
        let mut a = Assistant::new(AssistantConfig::instant(Some(1234)));
        let mut b = Assistant::new(AssistantConfig::instant(Some(1234)));
        let first = tokio_test::block_on(a.chat("hello")).unwrap();
        let second = tokio_test::block_on(b.chat("hello")).unwrap();
        assert_eq!(first, second);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn log_output(verbosity: Verbosity, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter_directive(verbosity)))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_rejections_silent_at_normal_verbosity() {
        let assistant = instant();
        let output = log_output(Verbosity::Normal, || {
            assert!(assistant.bmi_from_text("0", "70").is_err());
            assert!(assistant.bmi_from_text("", "70").is_err());
        });
        assert!(output.is_empty(), "unexpected log output: {}", output);
        assert_eq!(assistant.telemetry().get_stats().inputs_rejected, 2);
    }

    #[test]
    fn test_rejections_logged_when_verbose() {
        let assistant = instant();
        let output = log_output(Verbosity::Verbose, || {
            assert!(assistant.bmi_from_text("170", "abc").is_err());
        });
        assert!(output.contains("Input rejected"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_waits_for_latency_window() {
        let mut assistant = Assistant::new(AssistantConfig {
            latency: LatencyProfile::default(),
            seed: Some(3),
        });
        let start = tokio::time::Instant::now();
        assistant.chat("How much water should I drink?").await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(2000), "elapsed {:?}", elapsed);
        assert!(elapsed <= Duration::from_millis(3000) + Duration::from_millis(5));
    }
}
