//! # 폼 입력 검증/변환 유틸리티
//!
//! HTML 폼에서 들어온 문자열을 도메인 입력값으로 바꿉니다.
//! - `required()`: 공백만 있거나 빈 값이면 검증 에러 (값 자체는 그대로 보존)
//! - `coerce_ids()`: 반복 키로 들어온 ID 목록을 정수 집합으로 변환

use std::collections::BTreeSet;

use crate::error::AppError;

/// 필수 텍스트 필드를 검사합니다. 공백만 있는 값도 비어 있는 것으로 봅니다.
///
/// 검사에만 trim을 쓰고, 저장되는 값은 제출된 그대로입니다.
/// 게시글 본문의 들여쓰기나 끝 줄바꿈도 유지됩니다.
pub fn required(field: &str, value: &str) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    Ok(value.to_string())
}

/// 반복 폼 값(`tags=1&tags=2`)을 정렬된 고유 ID 목록으로 바꿉니다.
///
/// 정수로 파싱되지 않는 값은 에러 없이 버립니다. 존재하지 않는 ID를
/// 거르는 일은 DB 계층의 몫입니다.
pub fn coerce_ids(values: &[String]) -> Vec<i64> {
    values
        .iter()
        .filter_map(|value| value.trim().parse::<i64>().ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_keeps_the_value_verbatim() {
        assert_eq!(required("name", "  tech ").unwrap(), "  tech ");
        assert_eq!(
            required("content", "  indented code\n").unwrap(),
            "  indented code\n"
        );
    }

    #[test]
    fn required_rejects_blank() {
        let err = required("title", " \t").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "title is required"));
    }

    #[test]
    fn coerce_ids_collapses_duplicates_and_drops_garbage() {
        let values: Vec<String> = ["3", "1", "x", "3", "", "2.5", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(coerce_ids(&values), vec![1, 3]);
    }

    #[test]
    fn coerce_ids_of_nothing_is_empty() {
        assert!(coerce_ids(&[]).is_empty());
    }
}
