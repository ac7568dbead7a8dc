//! Prompt builders for the four response contracts.
//!
//! Each prompt states the exact JSON shape the service must return; the
//! matching Rust types live in `schemas.rs`. Keep the two in sync.

/// Lifestyle coaching plan for a diagnosed condition.
pub fn coaching_prompt(
    age: u32,
    gender: &str,
    height_cm: u32,
    weight_kg: u32,
    disease: &str,
) -> String {
    format!(
        "You are a lifestyle and health coach. Give specific, actionable \
         recommendations for a {age}-year-old {gender} ({height_cm} cm, {weight_kg} kg) \
         diagnosed with {disease}: diet, physical activity, weight management, sleep, \
         stress management, regular checkups, healthy habits, preventive measures, and \
         lifestyle changes.\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\n\
           \"title\": \"<brief plan title>\",\n\
           \"introduction\": \"<one or two encouraging sentences>\",\n\
           \"sections\": [{{\"title\": \"<topic>\", \"items\": [{{\"subtitle\": \"<short label>\", \"description\": \"<advice sentence>\"}}]}}],\n\
           \"note\": \"<disclaimer that this is not professional medical advice>\"\n\
         }}"
    )
}

/// Medicine extraction from a prescription image.
pub fn prescription_prompt() -> String {
    "You are an expert in reading handwritten medical prescriptions, acting as a \
     pharmacist. Extract every medicine from the attached prescription image.\n\n\
     Respond with a single JSON object and nothing else:\n\
     {\n\
       \"title\": \"<brief prescription title>\",\n\
       \"error\": <true if the image cannot be read as a prescription>,\n\
       \"errorMessage\": \"<why, when error is true; empty otherwise>\",\n\
       \"medicines\": [{\n\
         \"name\": \"<medicine name>\",\n\
         \"details\": {\n\
           \"uses\": \"<one sentence on what it treats>\",\n\
           \"sideEffects\": [\"<three possible side effects>\"],\n\
           \"safetyAdvice\": \"<one sentence of safety advice>\",\n\
           \"purchaseLinks\": [\"<reputable purchase links, may be empty>\"]\n\
         }\n\
       }]\n\
     }"
        .to_string()
}

/// Generalized analysis of a medical document (lab report, discharge
/// summary, doctor's note, ...).
pub fn document_prompt() -> String {
    "You are an expert in analyzing medical documents such as lab reports, discharge \
     summaries, diagnostic reports, and doctor's notes. Extract all health-related \
     information from the attached document: diagnoses, test results, treatments, \
     medicines, and advice for the patient.\n\n\
     Respond with a single JSON object and nothing else:\n\
     {\n\
       \"title\": \"<brief document summary title>\",\n\
       \"error\": <true if the document cannot be processed>,\n\
       \"errorMessage\": \"<why, when error is true; empty otherwise>\",\n\
       \"sections\": [{\n\
         \"title\": \"<e.g. Diagnosis, Lab Results, Medicines, Lifestyle Advice>\",\n\
         \"items\": [{\n\
           \"label\": \"<the diagnosis, test, medicine, or advice label>\",\n\
           \"details\": [{\"title\": \"<aspect>\", \"content\": \"<sentence, or an array of strings for Side Effects>\"}]\n\
         }]\n\
       }]\n\
     }"
        .to_string()
}

/// Translate previously generated content into the caller's preferred
/// language, preserving the JSON structure exactly.
pub fn translation_prompt(target_language: &str, content: &str) -> String {
    format!(
        "You are an expert translator. Translate every string value in the JSON \
         content below into {target_language}. Preserve the structure, keys, \
         formatting, and any special characters exactly. Respond with only the \
         translated JSON object — no commentary, no introduction.\n\n\
         Content:\n{content}"
    )
}
