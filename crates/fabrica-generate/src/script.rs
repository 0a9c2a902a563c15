//! Custom-code loader.
//!
//! This is the only place user-authored source text becomes executable
//! logic. Sources are parsed once into an operator tree; invocation binds
//! the fixed parameter names for the code kind and converts the result
//! back to JSON.

use evalexpr::{
    ContextWithMutableVariables, DefaultNumericTypes, HashMapContext, Node,
    Value as EvalValue, build_operator_tree,
};
use serde_json::Value;

use fabrica_core::{CodeKind, CustomCode};

use crate::errors::{GenerateError, Result};

/// A parsed, reusable piece of user code.
#[derive(Debug, Clone)]
pub struct CompiledCode {
    kind: CodeKind,
    program: Node<DefaultNumericTypes>,
}

impl CompiledCode {
    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    /// `customFunction(indexOfElement) -> value`
    pub fn run_function(&self, index: u64) -> Result<Value> {
        let ctx = self.context(index)?;
        let result = self.eval(&ctx, index)?;
        from_eval_value(result)
    }

    /// `customMap(element, indexOfElement) -> value`
    pub fn run_map(&self, element: &Value, index: u64) -> Result<Value> {
        let mut ctx = self.context(index)?;
        self.bind(&mut ctx, "element", to_eval_value(element), index)?;
        let result = self.eval(&ctx, index)?;
        if matches!(result, EvalValue::Empty) {
            return Err(GenerateError::UndefinedMap { index });
        }
        from_eval_value(result)
    }

    /// `customCompare(element, createdElements, indexOfElement) -> bool`
    pub fn run_compare(&self, element: &Value, created: &[Value], index: u64) -> Result<bool> {
        let mut ctx = self.context(index)?;
        self.bind(&mut ctx, "element", to_eval_value(element), index)?;
        let tuple = EvalValue::Tuple(created.iter().map(to_eval_value).collect());
        self.bind(&mut ctx, "createdElements", tuple, index)?;
        match self.eval(&ctx, index)? {
            EvalValue::Boolean(b) => Ok(b),
            _ => Err(GenerateError::NonBooleanCompare { index }),
        }
    }

    fn context(&self, index: u64) -> Result<HashMapContext<DefaultNumericTypes>> {
        let mut ctx = HashMapContext::<DefaultNumericTypes>::new();
        self.bind(&mut ctx, "indexOfElement", EvalValue::Int(index as i64), index)?;
        Ok(ctx)
    }

    fn bind(
        &self,
        ctx: &mut HashMapContext<DefaultNumericTypes>,
        name: &str,
        value: EvalValue<DefaultNumericTypes>,
        index: u64,
    ) -> Result<()> {
        ctx.set_value(name.to_string(), value)
            .map_err(|e| GenerateError::Eval {
                role: self.kind.role(),
                index,
                message: e.to_string(),
            })
    }

    fn eval(
        &self,
        ctx: &HashMapContext<DefaultNumericTypes>,
        index: u64,
    ) -> Result<EvalValue<DefaultNumericTypes>> {
        self.program
            .eval_with_context(ctx)
            .map_err(|e| GenerateError::Eval {
                role: self.kind.role(),
                index,
                message: e.to_string(),
            })
    }
}

/// Compiles user code into reusable programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeRuntime;

impl CodeRuntime {
    pub fn compile(&self, code: &CustomCode) -> Result<CompiledCode> {
        let program = build_operator_tree(&code.source).map_err(|e| GenerateError::Compile {
            role: code.kind.role(),
            message: e.to_string(),
        })?;
        Ok(CompiledCode {
            kind: code.kind,
            program,
        })
    }
}

fn to_eval_value(value: &Value) -> EvalValue<DefaultNumericTypes> {
    match value {
        Value::Null => EvalValue::Empty,
        Value::Bool(b) => EvalValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                EvalValue::Int(i)
            } else {
                EvalValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => EvalValue::String(s.clone()),
        Value::Array(items) => EvalValue::Tuple(items.iter().map(to_eval_value).collect()),
        // Objects cross the boundary as their canonical JSON text.
        Value::Object(_) => EvalValue::String(value.to_string()),
    }
}

fn from_eval_value(value: EvalValue<DefaultNumericTypes>) -> Result<Value> {
    Ok(match value {
        EvalValue::String(s) => Value::String(s),
        EvalValue::Int(i) => Value::Number(i.into()),
        EvalValue::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| GenerateError::NonSerializable(format!("non-finite number {f}")))?,
        EvalValue::Boolean(b) => Value::Bool(b),
        EvalValue::Tuple(items) => Value::Array(
            items
                .into_iter()
                .map(from_eval_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        EvalValue::Empty => Value::Null,
    })
}
