//! # 빈 필드 제거 (Field Sanitizer)
//!
//! 폼에서 비워 둔 필드는 `""`로 넘어옵니다. 이 값을 그대로 부분 업데이트에 쓰면
//! 저장된 값이 빈 문자열로 덮어써지므로, 수정 요청 본문을 역직렬화하기 전에
//! 빈 문자열 필드를 걸러냅니다.
//!
//! 예: `{ "brew": { "name": "", "style": "IPA" } }` → `{ "brew": { "style": "IPA" } }`

use serde_json::Value;

/// 값이 정확히 `""`인 객체 키를 재귀적으로 제거한 새 값을 반환합니다.
///
/// - 중첩된 객체는 안쪽까지 내려가며 같은 규칙을 적용합니다.
/// - 배열은 손대지 않습니다. 단계(step) 레코드처럼 형식이 자유로운 데이터가 들어 있기 때문입니다.
/// - `0`, `false`, `null`, 빈 배열, 빈 객체는 빈 문자열이 아니므로 그대로 남습니다.
pub fn strip_blank_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !matches!(v, Value::String(s) if s.is_empty()))
                .map(|(k, v)| (k, strip_blank_fields(v)))
                .collect(),
        ),
        other => other,
    }
}
