//! # pw.x tag 值格式化
//!
//! - 布尔值 -> `.true.` / `.false.`
//! - 字符串 -> 原样加双引号（不转义）
//! - 其他（整数、浮点数……） -> 默认的最短十进制表示，例如 `1e-10`
//!
//! ## 依赖关系
//! - 被 `qe/cards.rs` 使用

use serde_json::Value;

/// 格式化 tag 的值
pub fn qe_val_formatter(val: &Value) -> String {
    match val {
        Value::Bool(b) => format!(".{}.", b),
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qe_val_formatter() {
        assert_eq!(qe_val_formatter(&json!(true)), ".true.");
        assert_eq!(qe_val_formatter(&json!(false)), ".false.");
        assert_eq!(qe_val_formatter(&json!("False")), "\"False\"");
        assert_eq!(qe_val_formatter(&json!(12345)), "12345");
        assert_eq!(qe_val_formatter(&json!(1e-10)), "1e-10");
    }

    #[test]
    fn test_floats_use_shortest_form() {
        assert_eq!(qe_val_formatter(&json!(0.3)), "0.3");
        assert_eq!(qe_val_formatter(&json!(45.0)), "45.0");
        assert_eq!(qe_val_formatter(&json!(-2)), "-2");
    }

    #[test]
    fn test_strings_are_not_escaped() {
        assert_eq!(qe_val_formatter(&json!("a\"b")), "\"a\"b\"");
        assert_eq!(qe_val_formatter(&json!("./out dir")), "\"./out dir\"");
    }
}
