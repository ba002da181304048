//! JSON 字符串转义 - 让聚合结果可以直接嵌入为字符串值

use std::fmt::Write;

/// 按 JSON 字符串规则转义
///
/// `"` `\` 和 `\b \f \n \r \t` 使用短转义，其余小于 0x20 的控制字符写成 `\u00xx`，
/// 其他字符原样输出。
pub fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);

    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }

    out
}
