use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One user question plus the product text it should be answered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub question: String,
    pub context: String,
}

impl Query {
    pub fn new(question: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
        }
    }
}

/// Structured reply produced by the model for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SalesResponse {
    /// 사용자의 의도(현장 용어 해석 포함)와 검색된 정보 중 가장 적합한 상품을 선택한 논리적 과정 요약
    pub thought: String,
    /// 사용자에게 보여질 실제 친절한 답변 텍스트 (줄바꿈은 \n 사용)
    pub answer: String,
    /// 연관 상품 태그 리스트 (예: ['#롤러', '#마스킹테이프'])
    pub related_tags: Vec<String>,
}
