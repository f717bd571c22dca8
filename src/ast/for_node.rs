use std::rc::Rc;

use crate::ast::Node;
use crate::position::Position;
use crate::token::Token;

#[derive(Debug, Clone)]
pub struct ForNode {
    pub var_name_tok: Token,
    pub start_value_node: Box<Node>,
    pub end_value_node: Box<Node>,
    pub step_value_node: Option<Box<Node>>,
    pub body_node: Box<Node>,
    pub returns_unit: bool,
    pub start: Position,
    pub end: Position,
}

impl ForNode {
    pub fn new(
        var_name_tok: Token,
        start_value_node: Node,
        end_value_node: Node,
        step_value_node: Option<Node>,
        body_node: Node,
        returns_unit: bool,
    ) -> Self {
        let start = var_name_tok.start.clone();
        let end = body_node.end().clone();
        Self {
            var_name_tok,
            start_value_node: Box::new(start_value_node),
            end_value_node: Box::new(end_value_node),
            step_value_node: step_value_node.map(Box::new),
            body_node: Box::new(body_node),
            returns_unit,
            start,
            end,
        }
    }

    pub fn name(&self) -> Rc<str> {
        self.var_name_tok.text().map(Rc::from).unwrap_or_else(|| Rc::from(""))
    }
}
