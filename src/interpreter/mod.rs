//! Tree-walking interpreter (spec §4.4): one visit method per AST variant,
//! threading a [`RuntimeResult`] that carries value, error, and the three
//! non-local control signals.

mod runtime_result;

pub use runtime_result::RuntimeResult;

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{
    BreakNode, CallNode, ContinueNode, ForNode, FuncDefNode, IfNode, ListNode, Node, NumberNode,
    ReturnNode, StringNode, UnaryOpNode, VarAccessNode, VarAssignNode, WhileNode,
};
use crate::ast::BinOpNode;
use crate::builtins;
use crate::config::Config;
use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::environment::Environment;
use crate::globals::null_value;
use crate::position::Position;
use crate::token::{TokenType, TokenValue};
use crate::value::{ListValue, Number, StringValue, UserFunction, Value};

pub struct Interpreter {
    config: Rc<Config>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Rc::new(Config::default()))
    }

    /// Used so the `RUN` builtin can resolve nested scripts against the same
    /// `.wisp.toml` search path as the top-level invocation (SPEC_FULL §2/§3).
    pub fn with_config(config: Rc<Config>) -> Self {
        Self { config }
    }

    pub fn visit(
        &mut self,
        node: &Node,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        match node {
            Node::Number(n) => self.visit_number(n, context),
            Node::String(n) => self.visit_string(n, context),
            Node::List(n) => self.visit_list(n, env, context),
            Node::VarAccess(n) => self.visit_var_access(n, env, context),
            Node::VarAssign(n) => self.visit_var_assign(n, env, context),
            Node::BinOp(n) => self.visit_bin_op(n, env, context),
            Node::UnaryOp(n) => self.visit_unary_op(n, env, context),
            Node::If(n) => self.visit_if(n, env, context),
            Node::For(n) => self.visit_for(n, env, context),
            Node::While(n) => self.visit_while(n, env, context),
            Node::FuncDef(n) => self.visit_func_def(n, env, context),
            Node::Call(n) => self.visit_call(n, env, context),
            Node::Return(n) => self.visit_return(n, env, context),
            Node::Continue(n) => self.visit_continue(n),
            Node::Break(n) => self.visit_break(n),
        }
    }

    fn visit_number(&mut self, node: &NumberNode, context: &Rc<Context>) -> RuntimeResult {
        let res = RuntimeResult::new();
        let number = match node.tok.value {
            TokenValue::Int(n) => Number::from_int(n, node.start.clone(), node.end.clone()),
            TokenValue::Float(f) => Number::from_float(f, node.start.clone(), node.end.clone()),
            _ => unreachable!("NumberNode always wraps an INT or FLOAT token"),
        };
        res.success(Value::Number(number).with_context(context.clone()))
    }

    fn visit_string(&mut self, node: &StringNode, context: &Rc<Context>) -> RuntimeResult {
        let res = RuntimeResult::new();
        let text = node.tok.text().unwrap_or_default().to_string();
        res.success(
            Value::String(StringValue::new(text, node.start.clone(), node.end.clone()))
                .with_context(context.clone()),
        )
    }

    fn visit_list(
        &mut self,
        node: &ListNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let mut elements = Vec::with_capacity(node.element_nodes.len());
        for element in &node.element_nodes {
            let value = match res.register(self.visit(element, env, context)) {
                Some(v) => v,
                None => return res,
            };
            elements.push(value);
        }
        res.success(
            Value::List(ListValue::new(elements, node.start.clone(), node.end.clone()))
                .with_context(context.clone()),
        )
    }

    fn visit_var_access(
        &mut self,
        node: &VarAccessNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let res = RuntimeResult::new();
        let name = node.name();
        match env.borrow().get(&name) {
            Some(value) => res.success(
                value
                    .with_position(node.start.clone(), node.end.clone())
                    .with_context(context.clone()),
            ),
            None => res.failure(Diagnostic::runtime_error(
                format!("'{}' is not defined", name),
                node.start.clone(),
                node.end.clone(),
                context.clone(),
            )),
        }
    }

    fn visit_var_assign(
        &mut self,
        node: &VarAssignNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let value = match res.register(self.visit(&node.value_node, env, context)) {
            Some(v) => v,
            None => return res,
        };
        env.borrow_mut().set(node.name(), value.clone());
        res.success(value)
    }

    fn visit_bin_op(
        &mut self,
        node: &BinOpNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let left = match res.register(self.visit(&node.left_node, env, context)) {
            Some(v) => v,
            None => return res,
        };
        let right = match res.register(self.visit(&node.right_node, env, context)) {
            Some(v) => v,
            None => return res,
        };

        let result = match node.op_tok.kind {
            TokenType::Sum => left.added_to(&right),
            TokenType::Minus => left.subbed_by(&right),
            TokenType::Mul => left.multed_by(&right),
            TokenType::Div => left.dived_by(&right),
            TokenType::Pow => left.powed_by(&right),
            TokenType::Ee => left.get_comparison_eq(&right),
            TokenType::Ne => left.get_comparison_ne(&right),
            TokenType::Lt => left.get_comparison_lt(&right),
            TokenType::Gt => left.get_comparison_gt(&right),
            TokenType::Lte => left.get_comparison_lte(&right),
            TokenType::Gte => left.get_comparison_gte(&right),
            TokenType::Keyword if node.op_tok.is_keyword("AND") => left.anded_by(&right),
            TokenType::Keyword if node.op_tok.is_keyword("OR") => left.ored_by(&right),
            _ => unreachable!("parser only ever builds BinOpNode with a binary operator token"),
        };

        match result {
            Ok(value) => res.success(
                value
                    .with_position(node.start.clone(), node.end.clone())
                    .with_context(context.clone()),
            ),
            Err(err) => res.failure(err),
        }
    }

    fn visit_unary_op(
        &mut self,
        node: &UnaryOpNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let value = match res.register(self.visit(&node.node, env, context)) {
            Some(v) => v,
            None => return res,
        };

        let result = if node.op_tok.kind == TokenType::Minus {
            let minus_one = Value::Number(Number::from_int(-1, node.start.clone(), node.end.clone()));
            value.multed_by(&minus_one)
        } else if node.op_tok.is_keyword("NOT") {
            value.notted()
        } else {
            Ok(value)
        };

        match result {
            Ok(value) => res.success(value.with_position(node.start.clone(), node.end.clone())),
            Err(err) => res.failure(err),
        }
    }

    fn visit_if(
        &mut self,
        node: &IfNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();

        for case in &node.cases {
            let condition = match res.register(self.visit(&case.condition, env, context)) {
                Some(v) => v,
                None => return res,
            };
            if condition.is_truthy() {
                let value = match res.register(self.visit(&case.body, env, context)) {
                    Some(v) => v,
                    None => return res,
                };
                return if case.returns_unit {
                    res.success(null_value())
                } else {
                    res.success(value)
                };
            }
        }

        if let Some(else_case) = &node.else_case {
            let value = match res.register(self.visit(&else_case.body, env, context)) {
                Some(v) => v,
                None => return res,
            };
            return if else_case.returns_unit {
                res.success(null_value())
            } else {
                res.success(value)
            };
        }

        res.success(null_value())
    }

    fn visit_for(
        &mut self,
        node: &ForNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();

        let start_value = match res.register(self.visit(&node.start_value_node, env, context)) {
            Some(v) => v,
            None => return res,
        };
        let end_value = match res.register(self.visit(&node.end_value_node, env, context)) {
            Some(v) => v,
            None => return res,
        };
        let step_value = match &node.step_value_node {
            Some(step_node) => match res.register(self.visit(step_node, env, context)) {
                Some(v) => v,
                None => return res,
            },
            None => Value::Number(Number::from_int(1, Position::synthetic(), Position::synthetic())),
        };

        let (Value::Number(start_num), Value::Number(end_num), Value::Number(step_num)) =
            (start_value, end_value, step_value)
        else {
            return res.failure(Diagnostic::runtime_error(
                "FOR bounds must be numbers",
                node.start.clone(),
                node.end.clone(),
                context.clone(),
            ));
        };

        let step_nonneg = step_num.num.as_f64() >= 0.0;
        let mut current = start_num;
        let mut elements = Vec::new();
        let name = node.name();

        loop {
            let keep_going = if step_nonneg {
                current.num.as_f64() < end_num.num.as_f64()
            } else {
                current.num.as_f64() > end_num.num.as_f64()
            };
            if !keep_going {
                break;
            }

            env.borrow_mut().set(name.clone(), Value::Number(current.clone()));
            let next = match current.added_to(&step_num) {
                Ok(n) => n,
                Err(err) => return res.failure(err),
            };

            let value = res.register(self.visit(&node.body_node, env, context));
            if res.error.is_some() || res.func_return_value.is_some() {
                return res;
            }
            if res.loop_should_continue {
                current = next;
                continue;
            }
            if res.loop_should_break {
                break;
            }
            if !node.returns_unit {
                if let Some(v) = value {
                    elements.push(v);
                }
            }
            current = next;
        }

        if node.returns_unit {
            res.success(null_value())
        } else {
            res.success(
                Value::List(ListValue::new(elements, node.start.clone(), node.end.clone()))
                    .with_context(context.clone()),
            )
        }
    }

    fn visit_while(
        &mut self,
        node: &WhileNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let mut elements = Vec::new();

        loop {
            let condition = match res.register(self.visit(&node.condition_node, env, context)) {
                Some(v) => v,
                None => return res,
            };
            if !condition.is_truthy() {
                break;
            }

            let value = res.register(self.visit(&node.body_node, env, context));
            if res.error.is_some() || res.func_return_value.is_some() {
                return res;
            }
            if res.loop_should_continue {
                continue;
            }
            if res.loop_should_break {
                break;
            }
            if !node.returns_unit {
                if let Some(v) = value {
                    elements.push(v);
                }
            }
        }

        if node.returns_unit {
            res.success(null_value())
        } else {
            res.success(
                Value::List(ListValue::new(elements, node.start.clone(), node.end.clone()))
                    .with_context(context.clone()),
            )
        }
    }

    fn visit_func_def(
        &mut self,
        node: &FuncDefNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let res = RuntimeResult::new();
        let func = UserFunction::new(
            node.name(),
            node.arg_names(),
            Rc::new((*node.body_node).clone()),
            node.auto_return,
            env.clone(),
            node.start.clone(),
            node.end.clone(),
        )
        .with_context(context.clone());

        let value = Value::UserFunction(func);
        if let Some(name) = node.name() {
            env.borrow_mut().set(name, value.clone());
        }
        res.success(value)
    }

    fn visit_call(
        &mut self,
        node: &CallNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let callee = match res.register(self.visit(&node.node_to_call, env, context)) {
            Some(v) => v,
            None => return res,
        };

        let mut args = Vec::with_capacity(node.arg_nodes.len());
        for arg_node in &node.arg_nodes {
            let value = match res.register(self.visit(arg_node, env, context)) {
                Some(v) => v,
                None => return res,
            };
            args.push(value);
        }

        match callee {
            Value::UserFunction(func) => {
                let call_result =
                    self.call_user_function(&func, args, node.start.clone(), node.end.clone());
                let value = res.register(call_result);
                if res.should_return() {
                    return res;
                }
                res.success(
                    value
                        .unwrap()
                        .with_position(node.start.clone(), node.end.clone())
                        .with_context(context.clone()),
                )
            }
            Value::BuiltinFunction(func) => {
                let call_result = builtins::call(
                    &func.name,
                    args,
                    node.start.clone(),
                    node.end.clone(),
                    context.clone(),
                    &self.config,
                );
                let value = res.register(call_result);
                if res.should_return() {
                    return res;
                }
                res.success(
                    value
                        .unwrap()
                        .with_position(node.start.clone(), node.end.clone())
                        .with_context(context.clone()),
                )
            }
            other => res.failure(Diagnostic::runtime_error(
                "Illegal operation",
                other.start().clone(),
                node.end.clone(),
                context.clone(),
            )),
        }
    }

    /// Mirrors the original source's call convention exactly: if the body
    /// produces a bare `continue`/`break` (no explicit `RETURN`), that
    /// signal is returned unreset and bubbles out of this call into
    /// whatever loop is iterating the call expression (spec §4.3).
    fn call_user_function(
        &mut self,
        func: &UserFunction,
        args: Vec<Value>,
        call_start: Position,
        call_end: Position,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();

        let exec_context = Rc::new(Context::new(
            func.display_name(),
            func.context.clone(),
            Some(call_start.clone()),
        ));

        if args.len() != func.arg_names.len() {
            let detail = if args.len() > func.arg_names.len() {
                format!(
                    "{} too many args passed into '{}'",
                    args.len() - func.arg_names.len(),
                    func.display_name()
                )
            } else {
                format!(
                    "{} too few args passed into '{}'",
                    func.arg_names.len() - args.len(),
                    func.display_name()
                )
            };
            return res.failure(Diagnostic::runtime_error(
                detail,
                call_start,
                call_end,
                exec_context,
            ));
        }

        let child_env = Rc::new(RefCell::new(Environment::new(Some(func.defining_env.clone()))));
        for (name, value) in func.arg_names.iter().zip(args.into_iter()) {
            let value = value
                .with_position(call_start.clone(), call_end.clone())
                .with_context(exec_context.clone());
            child_env.borrow_mut().set(name.clone(), value);
        }

        let value = res.register(self.visit(&func.body, &child_env, &exec_context));
        if res.should_return() && res.func_return_value.is_none() {
            return res;
        }

        let ret_value = res
            .func_return_value
            .clone()
            .or(if func.auto_return { value } else { None })
            .unwrap_or_else(null_value);
        res.success(ret_value)
    }

    fn visit_return(
        &mut self,
        node: &ReturnNode,
        env: &Rc<RefCell<Environment>>,
        context: &Rc<Context>,
    ) -> RuntimeResult {
        let mut res = RuntimeResult::new();
        let value = match &node.node_to_return {
            Some(expr) => match res.register(self.visit(expr, env, context)) {
                Some(v) => v,
                None => return res,
            },
            None => null_value(),
        };
        res.success_return(value)
    }

    fn visit_continue(&mut self, _node: &ContinueNode) -> RuntimeResult {
        RuntimeResult::new().success_continue()
    }

    fn visit_break(&mut self, _node: &BreakNode) -> RuntimeResult {
        RuntimeResult::new().success_break()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
