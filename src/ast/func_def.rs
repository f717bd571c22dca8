use std::rc::Rc;

use crate::ast::Node;
use crate::position::Position;
use crate::token::Token;

#[derive(Debug, Clone)]
pub struct FuncDefNode {
    pub var_name_tok: Option<Token>,
    pub arg_name_toks: Vec<Token>,
    pub body_node: Box<Node>,
    pub auto_return: bool,
    pub start: Position,
    pub end: Position,
}

impl FuncDefNode {
    pub fn new(
        var_name_tok: Option<Token>,
        arg_name_toks: Vec<Token>,
        body_node: Node,
        auto_return: bool,
        def_start: Position,
    ) -> Self {
        let start = var_name_tok
            .as_ref()
            .map(|t| t.start.clone())
            .unwrap_or(def_start);
        let end = body_node.end().clone();
        Self {
            var_name_tok,
            arg_name_toks,
            body_node: Box::new(body_node),
            auto_return,
            start,
            end,
        }
    }

    pub fn name(&self) -> Option<Rc<str>> {
        self.var_name_tok.as_ref().and_then(|t| t.text()).map(Rc::from)
    }

    pub fn arg_names(&self) -> Vec<Rc<str>> {
        self.arg_name_toks
            .iter()
            .map(|t| t.text().map(Rc::from).unwrap_or_else(|| Rc::from("")))
            .collect()
    }
}
