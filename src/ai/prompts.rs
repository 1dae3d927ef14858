// src/ai/prompts.rs
//
// Prompt templates sent to the completion endpoint. The listing is French
// first, so extraction and enhancement prompts are written in French.

use std::collections::BTreeMap;

pub fn extraction_prompt(raw_text: &str) -> String {
    format!(
        r#"Analyse ce texte extrait d'un PDF de vente de villa et extrait les informations structurées.

Texte du PDF:
{raw_text}

Réponds UNIQUEMENT avec un objet JSON valide contenant ces champs (mets des valeurs vides "" ou 0 si l'information n'est pas disponible, n'omets aucune clé):
{{
    "reference": "référence de la villa",
    "title": "titre court et attractif de la villa",
    "price": nombre entier du prix en euros,
    "location": "ville ou région",
    "distance_city": "distance depuis la ville principale",
    "description": "description complète et attractive",
    "terrain_area": nombre entier de la surface du terrain en m²,
    "built_area": nombre entier de la surface construite en m²,
    "bedrooms": nombre entier de chambres/suites,
    "pool_size": "dimensions de la piscine",
    "features": "liste des caractéristiques principales, une par ligne",
    "equipment": "liste des équipements et confort, une par ligne",
    "business_info": "informations sur l'exploitation commerciale",
    "investment_benefits": "atouts pour investisseurs",
    "documents": "documents disponibles",
    "contact_phone": "numéro de téléphone",
    "contact_email": "email",
    "contact_website": "site web"
}}"#
    )
}

pub fn enhancement_prompt(text: &str, context_label: &str) -> String {
    format!(
        "Améliore ce texte pour une annonce immobilière de luxe en français. Contexte: {context_label}\n\n\
         Texte: {text}\n\n\
         Réponds uniquement avec le texte amélioré, sans explication ni commentaire."
    )
}

/// `batch` is already filtered to non-blank values; `expected` lists the
/// `_en` keys the model may answer with, in the same order.
pub fn translation_prompt(batch: &BTreeMap<String, String>, expected: &[String]) -> String {
    let source = serde_json::to_string_pretty(batch).unwrap_or_default();
    let keys = expected
        .iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Translate the following luxury villa real estate content from French to English.
Maintain the professional, luxurious tone appropriate for high-end Marrakech real estate.
Preserve all line breaks and formatting exactly as shown (list fields have one item per line).

French content to translate:
{source}

Respond ONLY with a valid JSON object whose values are the English translations.
Use exactly these keys: {keys}.
Only include fields that were provided in the French content."#
    )
}
