//! 输入校验与序列化
//!
//! 每个实体声明一张字段表 (必填/可空/类型/最大长度)，`Schema::load` 按表检查 JSON 输入，
//! 收集所有字段的错误后一次性返回，全部通过后再反序列化为具体的请求结构。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use validator::ValidateLength;

/// 字段名 -> 错误原因列表
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const UNKNOWN: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// 文本列的长度上限 (VARCHAR(225))
pub const MAX_TEXT_LENGTH: u64 = 225;

/// 字段的基本类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Integer,
    Date,
}

impl FieldKind {
    fn invalid_message(&self) -> &'static str {
        match self {
            FieldKind::Text => "Not a valid string.",
            FieldKind::Float => "Not a valid number.",
            FieldKind::Integer => "Not a valid integer.",
            FieldKind::Date => "Not a valid date.",
        }
    }

    /// 检查并规范化单个值，数字字符串会被转换为数字
    fn coerce(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (FieldKind::Text, Value::String(_)) => Some(value.clone()),
            (FieldKind::Float, Value::Number(n)) => n.as_f64().map(|_| value.clone()),
            (FieldKind::Float, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(Number::from_f64)
                .map(Value::Number),
            (FieldKind::Integer, Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Some(Value::from(i));
                }
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| Value::from(f as i64))
            }
            (FieldKind::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),
            (FieldKind::Date, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|_| value.clone()),
            _ => None,
        }
    }
}

/// 字段声明
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    /// 文本字段的最大字符数
    pub max_length: Option<u64>,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
            max_length: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: true,
            max_length: None,
        }
    }

    pub const fn with_max_length(self, max: u64) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    /// 类型检查通过后的附加规则
    fn check_length(&self, value: &Value) -> Option<String> {
        match (self.max_length, value) {
            (Some(max), Value::String(s)) if !s.validate_length(None, Some(max), None) => {
                Some(format!("Longer than maximum length {}.", max))
            }
            _ => None,
        }
    }
}

/// 一个实体的加载规则
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// 校验输入并生成类型化的记录；任何字段失败都会使整个加载失败
    pub fn load<T>(&self, input: &Value) -> Result<T, FieldErrors>
    where
        T: DeserializeOwned,
    {
        let mut errors = FieldErrors::new();

        let Value::Object(object) = input else {
            push(&mut errors, "_schema", INVALID_INPUT);
            return Err(errors);
        };

        let mut loaded = Map::new();
        for field in self.fields {
            match object.get(field.name) {
                None if field.required => push(&mut errors, field.name, MISSING),
                None => {}
                Some(Value::Null) if field.nullable => {
                    loaded.insert(field.name.to_string(), Value::Null);
                }
                Some(Value::Null) => push(&mut errors, field.name, NULL),
                Some(value) => match field.kind.coerce(value) {
                    Some(coerced) => {
                        if let Some(message) = field.check_length(&coerced) {
                            push(&mut errors, field.name, &message);
                        }
                        loaded.insert(field.name.to_string(), coerced);
                    }
                    None => push(&mut errors, field.name, field.kind.invalid_message()),
                },
            }
        }

        // id 只用于输出，输入时忽略
        for key in object.keys() {
            if key != "id" && !self.fields.iter().any(|f| f.name == key) {
                push(&mut errors, key, UNKNOWN);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        serde_json::from_value(Value::Object(loaded)).map_err(|e| {
            let mut errors = FieldErrors::new();
            push(&mut errors, "_schema", &e.to_string());
            errors
        })
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}
