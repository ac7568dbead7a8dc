//! The fixed response schemas the AI service is instructed to follow.
//!
//! Four variants are in use: coaching plan, prescription analysis,
//! medical-document analysis, and translation. Translation mirrors the
//! input shape, so it is represented as a re-validated JSON value rather
//! than a dedicated struct.

use serde::{Deserialize, Serialize};

/// Schema variants that may declare their own failure. `parse_response`
/// fails closed when `declared_error` returns a message.
pub trait AiPayload {
    fn declared_error(&self) -> Option<String> {
        None
    }
}

// ── Coaching plan ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingPlan {
    pub title: String,
    pub introduction: String,
    pub sections: Vec<PlanSection>,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSection {
    pub title: String,
    pub items: Vec<PlanItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    pub subtitle: String,
    pub description: String,
}

impl AiPayload for CoachingPlan {}

// ── Prescription analysis ───────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionAnalysis {
    pub title: String,
    pub error: bool,
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub details: MedicineDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineDetails {
    pub uses: String,
    #[serde(rename = "sideEffects")]
    pub side_effects: Vec<String>,
    #[serde(rename = "safetyAdvice")]
    pub safety_advice: String,
    #[serde(rename = "purchaseLinks", default)]
    pub purchase_links: Vec<String>,
}

impl AiPayload for PrescriptionAnalysis {
    fn declared_error(&self) -> Option<String> {
        if self.error {
            Some(if self.error_message.is_empty() {
                "The AI service could not process the prescription".to_string()
            } else {
                self.error_message.clone()
            })
        } else {
            None
        }
    }
}

// ── Medical-document analysis ───────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub title: String,
    pub error: bool,
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(default)]
    pub sections: Vec<DocumentSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: String,
    pub items: Vec<DocumentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentItem {
    pub label: String,
    pub details: Vec<DetailEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailEntry {
    pub title: String,
    pub content: DetailContent,
}

/// Detail content is a plain sentence for most titles and a string list
/// for side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailContent {
    Text(String),
    List(Vec<String>),
}

impl AiPayload for DocumentAnalysis {
    fn declared_error(&self) -> Option<String> {
        if self.error {
            Some(if self.error_message.is_empty() {
                "The AI service could not process the document".to_string()
            } else {
                self.error_message.clone()
            })
        } else {
            None
        }
    }
}

// Translation mirrors the input shape; the value is re-validated as JSON
// by the parse contract but carries no error flag of its own.
impl AiPayload for serde_json::Value {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescription_analysis_deserializes_example() {
        let raw = r#"{
            "title": "Blood pressure prescription",
            "error": false,
            "errorMessage": "",
            "medicines": [{
                "name": "Amlodipine",
                "details": {
                    "uses": "Used to lower blood pressure.",
                    "sideEffects": ["Dizziness", "Swelling", "Fatigue"],
                    "safetyAdvice": "Take at the same time each day."
                }
            }]
        }"#;

        let analysis: PrescriptionAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(analysis.medicines.len(), 1);
        assert_eq!(analysis.medicines[0].details.side_effects.len(), 3);
        assert!(analysis.medicines[0].details.purchase_links.is_empty());
        assert!(analysis.declared_error().is_none());
    }

    #[test]
    fn prescription_analysis_error_flag_surfaces_message() {
        let analysis = PrescriptionAnalysis {
            title: String::new(),
            error: true,
            error_message: "Not a prescription image".into(),
            medicines: vec![],
        };
        assert_eq!(
            analysis.declared_error().as_deref(),
            Some("Not a prescription image")
        );
    }

    #[test]
    fn prescription_analysis_error_without_message_gets_default() {
        let analysis = PrescriptionAnalysis {
            title: String::new(),
            error: true,
            error_message: String::new(),
            medicines: vec![],
        };
        assert!(analysis.declared_error().unwrap().contains("could not process"));
    }

    #[test]
    fn document_analysis_mixed_detail_content() {
        let raw = r#"{
            "title": "Lab report",
            "error": false,
            "errorMessage": "",
            "sections": [{
                "title": "Medicines",
                "items": [{
                    "label": "Amlodipine",
                    "details": [
                        {"title": "Uses", "content": "Lowers blood pressure."},
                        {"title": "Side Effects", "content": ["Dizziness", "Swelling"]}
                    ]
                }]
            }]
        }"#;

        let analysis: DocumentAnalysis = serde_json::from_str(raw).unwrap();
        let details = &analysis.sections[0].items[0].details;
        assert!(matches!(details[0].content, DetailContent::Text(_)));
        assert!(matches!(details[1].content, DetailContent::List(_)));
    }

    #[test]
    fn coaching_plan_round_trips() {
        let plan = CoachingPlan {
            title: "Managing hypertension".into(),
            introduction: "A plan tailored for you.".into(),
            sections: vec![PlanSection {
                title: "Diet".into(),
                items: vec![PlanItem {
                    subtitle: "Limit sodium".into(),
                    description: "Aim for under 2,300mg per day.".into(),
                }],
            }],
            note: "Not a substitute for medical advice.".into(),
        };

        let json = serde_json::to_string(&plan).unwrap();
        let back: CoachingPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sections[0].items[0].subtitle, "Limit sodium");
    }
}
