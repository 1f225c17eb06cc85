use std::collections::HashMap;
use std::path::Path;

use crate::error::SalesAgentError;
use crate::file_config::PromptsConfig;
use crate::template::{resolve_runtime_vars, template_vars, validate_template};

/// Runtime slots a sales prompt may use.
pub const SALES_RUNTIME_VARS: &[&str] = &["context", "question"];

/// The exact sentence the model is told to answer with when the context has no match.
pub const REFUSAL_ANSWER: &str = "죄송하지만 해당 상품 정보는 현재 확인되지 않습니다.";

/// Built-in sales assistant instructions.
pub const SALES_PROMPT: &str = r##"# Role (역할)
당신은 건설 자재 전문 쇼핑몰 'Access Nine(엑세스나인)'의 숙련된 AI 영업 어시스턴트입니다.
사용자의 질문과 제공된 [검색된 상품 정보(Context)]를 바탕으로 가장 적절한 상품을 추천하고 답변해야 합니다.

# Operational Rules (운영 원칙)
1. **현장 용어 이해 및 응대:**
   - 사용자가 건설 현장 은어(예: 공구리, 우마, 반생, 야마 등)를 사용하면, 이를 표준 자재명으로 이해하고 답변에 자연스럽게 언급하세요.
   - 예시: "찾으시는 공구리(콘크리트) 작업용 자재로는..."
2. **Fact 기반 답변 (No Hallucination):**
   - 반드시 아래 제공되는 [Context] 내에 있는 정보로만 답변하세요.
   - [Context]에 없는 내용은 "죄송하지만 해당 상품 정보는 현재 확인되지 않습니다."라고 답하세요.
3. **영업 지향적 태도:**
   - 상품의 장점, 스펙, 용도를 간결하고 명확하게 설명하여 구매를 유도하세요.
4. **구조화된 출력 (Structured Output):**
   - 최종 답변은 반드시 **JSON 포맷**이어야 합니다. Markdown이나 잡담을 섞지 마세요.

# Output Format (JSON 형식)
{
  "thought": "사용자의 의도(현장 용어 해석 포함)와 검색된 정보 중 가장 적합한 상품을 선택한 논리적 과정 요약",
  "answer": "사용자에게 보여질 실제 친절한 답변 텍스트 (줄바꿈은 \n 사용)",
  "related_tags": ["#연관상품1", "#연관상품2", "#카테고리명"]
}

# Tag Recommendation Logic (태그 추천 로직)
- 'related_tags'에는 사용자가 검색한 상품과 함께 구매하면 좋은 상품(Cross-selling)이나 상위 카테고리를 3~5개 추천하세요.
- 예: '페인트' 검색 시 -> ["#롤러", "#마스킹테이프", "#신너"]

# Context (검색된 상품 정보)
{{context}}

---
# User Query (사용자 질문)
{{question}}
"##;

/// Instruction text with `{{context}}` and `{{question}}` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Validate and wrap a template. Both slots must be present and no others are allowed.
    pub fn new(text: impl Into<String>) -> Result<Self, SalesAgentError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SalesAgentError::Config("Prompt template is empty".into()));
        }
        validate_template(&text, SALES_RUNTIME_VARS)
            .map_err(|e| SalesAgentError::Config(format!("{e:#}")))?;

        let vars = template_vars(&text);
        for required in SALES_RUNTIME_VARS {
            if !vars.contains(required) {
                return Err(SalesAgentError::Config(format!(
                    "Prompt template is missing {{{{{required}}}}}"
                )));
            }
        }

        Ok(Self { text })
    }

    /// Load an alternate template from disk.
    pub fn from_file(path: &Path) -> Result<Self, SalesAgentError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SalesAgentError::Config(format!(
                "Failed to read sales prompt file {}: {e}",
                path.display()
            ))
        })?;
        Self::new(content).map_err(|e| match e {
            SalesAgentError::Config(msg) => {
                SalesAgentError::Config(format!("{msg} ({})", path.display()))
            }
            other => other,
        })
    }

    /// Built-in template unless `[prompts] sales` names a file.
    pub fn from_config(prompts: &PromptsConfig) -> Result<Self, SalesAgentError> {
        match prompts.sales {
            Some(ref path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Substitute both slots verbatim.
    pub fn render(&self, context: &str, question: &str) -> String {
        resolve_runtime_vars(
            &self.text,
            &HashMap::from([("context", context), ("question", question)]),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            text: SALES_PROMPT.to_string(),
        }
    }
}
