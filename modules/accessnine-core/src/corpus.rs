use std::path::Path;

use crate::error::SalesAgentError;
use crate::file_config::ContextConfig;

/// Built-in product corpus used when no context is supplied.
pub const MOCK_PRODUCT_DB: &str = "
[상품 ID: 101]
상품명: 강력 콘크리트 보수제 (FastFix 300)
카테고리: 보수/방수
특징: 30분 초속경, 고강도, 크랙 보수용
가격: 15,000원

[상품 ID: 102]
상품명: 전문가용 미장 흙손 (Stainless 300mm)
카테고리: 미장공구
특징: 녹슬지 않는 스테인리스, 편안한 그립감
가격: 8,500원

[상품 ID: 103]
상품명: 다목적 수성 프라이머 (PrimeOne 4L)
카테고리: 페인트/도장
특징: 강력한 부착력, 냄새 적음, 빠른 건조
가격: 22,000원

[상품 ID: 104]
상품명: 고강도 반생 (10번선) 1묶음
카테고리: 철물/자재
특징: 결속력 우수, 현장 필수 자재, 부식 방지 처리
가격: 45,000원
";

/// Context text used when a caller does not supply one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultContext(String);

impl DefaultContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn mock() -> Self {
        Self::new(MOCK_PRODUCT_DB)
    }

    pub fn from_file(path: &Path) -> Result<Self, SalesAgentError> {
        std::fs::read_to_string(path).map(Self).map_err(|e| {
            SalesAgentError::Config(format!(
                "Failed to read context corpus {}: {e}",
                path.display()
            ))
        })
    }

    /// The file named by `[context] corpus`, or the mock corpus.
    pub fn from_config(config: &ContextConfig) -> Result<Self, SalesAgentError> {
        match config.corpus {
            Some(ref path) => Self::from_file(path),
            None => Ok(Self::mock()),
        }
    }

    /// `supplied` if present, otherwise this default.
    pub fn resolve(&self, supplied: Option<String>) -> String {
        supplied.unwrap_or_else(|| self.0.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DefaultContext {
    fn default() -> Self {
        Self::mock()
    }
}
