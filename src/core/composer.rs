//! Request Composition
//!
//! Maps one user turn (prompt, mode, optional attachment) onto a request
//! plan: which remote model to call, with which options, and with which
//! system instruction. Selection is an ordered rule list evaluated
//! top-to-bottom; the first matching rule wins.

use super::persona;
use crate::config::ModelCatalog;
use crate::uplink::types::{
    Content, GenerateContentRequest, GenerationConfig, Part, ThinkingConfig, Tool,
};

/// Deliberation cap attached to the deep-analysis route.
pub const DEEP_ANALYSIS_THINKING_BUDGET: u32 = 32768;

/// Operating mode selected by the caller per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Standard mentor persona
    #[default]
    Mentor,
    /// Maximum-depth reasoning with a large thinking budget
    DeepAnalysis,
    /// Live web search with cited sources
    CveHunter,
    /// Lowest-latency variant for quick exchanges
    SpeedOps,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Mentor => "mentor",
            Mode::DeepAnalysis => "deep-analysis",
            Mode::CveHunter => "cve-hunter",
            Mode::SpeedOps => "speed-ops",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "mentor" => Ok(Mode::Mentor),
            "deep-analysis" | "deep" => Ok(Mode::DeepAnalysis),
            "cve-hunter" | "cve" => Ok(Mode::CveHunter),
            "speed-ops" | "speed" => Ok(Mode::SpeedOps),
            other => Err(format!("Unknown mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// User-supplied binary payload attached to a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Base64-encoded media bytes
    pub data: String,
    pub mime_type: String,
}

/// Ephemeral per-turn request plan. Computed fresh for every call and
/// never stored.
#[derive(Debug, Clone)]
pub struct RequestPlan {
    pub model: String,
    pub tools_enabled: bool,
    pub thinking_budget: Option<u32>,
    pub system_instruction: String,
    pub parts: Vec<Part>,
}

/// Compose the request plan for one turn.
///
/// Precedence, first match wins:
/// 1. attachment present → multimodal model, visual-data notice
/// 2. SpeedOps → fast model, brevity directive
/// 3. DeepAnalysis → reasoning model + thinking budget
/// 4. CveHunter → standard model + web search, grounding directive
/// 5. Mentor → standard model, base persona only
pub fn compose(
    prompt: &str,
    mode: Mode,
    attachment: Option<&Attachment>,
    models: &ModelCatalog,
) -> RequestPlan {
    let mut parts = vec![Part::text(prompt)];
    let mut instruction = persona::MENTOR_PERSONA.to_string();

    // Rule 1: an attachment always routes to the multimodal model,
    // regardless of the declared mode.
    if let Some(attachment) = attachment {
        parts.push(Part::inline_data(
            attachment.mime_type.clone(),
            attachment.data.clone(),
        ));
        instruction.push_str(persona::VISUAL_DATA_NOTICE);
        return RequestPlan {
            model: models.multimodal.clone(),
            tools_enabled: false,
            thinking_budget: None,
            system_instruction: instruction,
            parts,
        };
    }

    // Rules 2-5: mode routing, only reachable without an attachment.
    match mode {
        Mode::SpeedOps => {
            instruction.push_str(persona::BREVITY_DIRECTIVE);
            RequestPlan {
                model: models.fast.clone(),
                tools_enabled: false,
                thinking_budget: None,
                system_instruction: instruction,
                parts,
            }
        }
        Mode::DeepAnalysis => RequestPlan {
            model: models.reasoning.clone(),
            tools_enabled: false,
            thinking_budget: Some(DEEP_ANALYSIS_THINKING_BUDGET),
            system_instruction: instruction,
            parts,
        },
        Mode::CveHunter => {
            instruction.push_str(persona::SEARCH_GROUNDING_DIRECTIVE);
            RequestPlan {
                model: models.standard.clone(),
                tools_enabled: true,
                thinking_budget: None,
                system_instruction: instruction,
                parts,
            }
        }
        Mode::Mentor => RequestPlan {
            model: models.standard.clone(),
            tools_enabled: false,
            thinking_budget: None,
            system_instruction: instruction,
            parts,
        },
    }
}

impl RequestPlan {
    /// Lower the plan onto the wire request envelope
    pub fn to_request(&self) -> GenerateContentRequest {
        let generation_config = self.thinking_budget.map(|budget| GenerationConfig {
            thinking_config: Some(ThinkingConfig {
                thinking_budget: budget,
            }),
            ..Default::default()
        });

        let tools = self.tools_enabled.then(|| vec![Tool::google_search()]);

        GenerateContentRequest {
            contents: vec![Content::from_parts(self.parts.clone())],
            system_instruction: Some(Content::from_text(self.system_instruction.clone())),
            generation_config,
            tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models() -> ModelCatalog {
        ModelCatalog::default()
    }

    fn sample_attachment() -> Attachment {
        Attachment {
            data: "QUJDRA==".to_string(),
            mime_type: "image/png".to_string(),
        }
    }

    #[test]
    fn test_attachment_overrides_every_mode() {
        let catalog = models();
        let attachment = sample_attachment();

        for mode in [
            Mode::Mentor,
            Mode::DeepAnalysis,
            Mode::CveHunter,
            Mode::SpeedOps,
        ] {
            let plan = compose("inspect this", mode, Some(&attachment), &catalog);
            assert_eq!(plan.model, catalog.multimodal, "mode {:?}", mode);
            assert!(!plan.tools_enabled, "mode {:?}", mode);
            assert!(plan.thinking_budget.is_none(), "mode {:?}", mode);
            assert!(
                plan.system_instruction
                    .ends_with(persona::VISUAL_DATA_NOTICE),
                "mode {:?}",
                mode
            );
        }
    }

    #[test]
    fn test_attachment_part_follows_text_part() {
        let plan = compose(
            "what is in this capture?",
            Mode::Mentor,
            Some(&sample_attachment()),
            &models(),
        );

        assert_eq!(plan.parts.len(), 2);
        assert!(matches!(&plan.parts[0], Part::Text { text } if text == "what is in this capture?"));
        assert!(matches!(
            &plan.parts[1],
            Part::InlineData { inline_data } if inline_data.mime_type == "image/png"
        ));
    }

    #[test]
    fn test_four_modes_produce_distinct_plans() {
        let catalog = models();
        let plans: Vec<RequestPlan> = [
            Mode::Mentor,
            Mode::DeepAnalysis,
            Mode::CveHunter,
            Mode::SpeedOps,
        ]
        .into_iter()
        .map(|mode| compose("scan the perimeter", mode, None, &catalog))
        .collect();

        // Expected shapes, rule by rule
        assert_eq!(plans[0].model, catalog.standard);
        assert!(!plans[0].tools_enabled);
        assert!(plans[0].thinking_budget.is_none());

        assert_eq!(plans[1].model, catalog.reasoning);
        assert!(!plans[1].tools_enabled);
        assert_eq!(
            plans[1].thinking_budget,
            Some(DEEP_ANALYSIS_THINKING_BUDGET)
        );

        assert_eq!(plans[2].model, catalog.standard);
        assert!(plans[2].tools_enabled);
        assert!(plans[2].thinking_budget.is_none());

        assert_eq!(plans[3].model, catalog.fast);
        assert!(!plans[3].tools_enabled);
        assert!(plans[3].thinking_budget.is_none());

        // No two plans may share a (model, tools, budget, instruction) shape
        for i in 0..plans.len() {
            for j in (i + 1)..plans.len() {
                let same = plans[i].model == plans[j].model
                    && plans[i].tools_enabled == plans[j].tools_enabled
                    && plans[i].thinking_budget == plans[j].thinking_budget
                    && plans[i].system_instruction == plans[j].system_instruction;
                assert!(!same, "plans {} and {} are identical", i, j);
            }
        }
    }

    #[test]
    fn test_branch_directives_append_to_base_persona() {
        let catalog = models();

        let hunter = compose("latest openssl cve", Mode::CveHunter, None, &catalog);
        assert!(hunter
            .system_instruction
            .starts_with(persona::MENTOR_PERSONA));
        assert!(hunter
            .system_instruction
            .ends_with(persona::SEARCH_GROUNDING_DIRECTIVE));

        let speed = compose("quick port list", Mode::SpeedOps, None, &catalog);
        assert!(speed.system_instruction.starts_with(persona::MENTOR_PERSONA));
        assert!(speed.system_instruction.ends_with(persona::BREVITY_DIRECTIVE));

        let mentor = compose("explain aslr", Mode::Mentor, None, &catalog);
        assert_eq!(mentor.system_instruction, persona::MENTOR_PERSONA);
    }

    #[test]
    fn test_plan_lowering_to_wire_request() {
        let catalog = models();

        let deep = compose("trace this heap bug", Mode::DeepAnalysis, None, &catalog);
        let request = deep.to_request();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            serde_json::json!(DEEP_ANALYSIS_THINKING_BUDGET)
        );
        assert!(json.get("tools").is_none());

        let hunter = compose("latest openssl cve", Mode::CveHunter, None, &catalog);
        let json = serde_json::to_value(hunter.to_request()).unwrap();
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("mentor".parse::<Mode>().unwrap(), Mode::Mentor);
        assert_eq!("deep_analysis".parse::<Mode>().unwrap(), Mode::DeepAnalysis);
        assert_eq!("CVE-Hunter".parse::<Mode>().unwrap(), Mode::CveHunter);
        assert_eq!("speed".parse::<Mode>().unwrap(), Mode::SpeedOps);
        assert!("turbo".parse::<Mode>().is_err());
    }
}
