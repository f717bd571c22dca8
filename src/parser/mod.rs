//! Recursive-descent parser with one-token lookahead and speculative
//! backtracking (spec §4.2).

mod parse_result;

pub use parse_result::ParseResult;

use crate::ast::{
    BinOpNode, BreakNode, CallNode, ContinueNode, ElseCase, ForNode, FuncDefNode, IfCase, IfNode,
    ListNode, Node, NumberNode, ReturnNode, StringNode, UnaryOpNode, VarAccessNode, VarAssignNode,
    WhileNode,
};
use crate::diagnostic::Diagnostic;
use crate::token::{Token, TokenType};

enum BinOpMatcher<'a> {
    Tokens(&'a [TokenType]),
    Keywords(&'a [&'a str]),
}

impl<'a> BinOpMatcher<'a> {
    fn matches(&self, tok: &Token) -> bool {
        match self {
            BinOpMatcher::Tokens(kinds) => kinds.contains(&tok.kind),
            BinOpMatcher::Keywords(words) => words.iter().any(|w| tok.is_keyword(w)),
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    tok_idx: usize,
    current_tok: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let current_tok = tokens[0].clone();
        Self {
            tokens,
            tok_idx: 0,
            current_tok,
        }
    }

    fn update_current_tok(&mut self) {
        if self.tok_idx < self.tokens.len() {
            self.current_tok = self.tokens[self.tok_idx].clone();
        }
    }

    fn advance(&mut self) -> Token {
        self.tok_idx += 1;
        self.update_current_tok();
        self.current_tok.clone()
    }

    fn reverse(&mut self, amount: usize) -> Token {
        self.tok_idx = self.tok_idx.saturating_sub(amount);
        self.update_current_tok();
        self.current_tok.clone()
    }

    pub fn parse(mut self) -> ParseResult<Node> {
        let mut res = self.statements();
        if res.error.is_none() && self.current_tok.kind != TokenType::Eof {
            return res.failure(Diagnostic::invalid_syntax(
                "Token cannot appear after previous tokens",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res
    }

    fn bin_op(
        &mut self,
        func_a: fn(&mut Self) -> ParseResult<Node>,
        matcher: BinOpMatcher,
        func_b: fn(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let mut left = match res.register(func_a(self)) {
            Some(l) => l,
            None => return res,
        };

        while matcher.matches(&self.current_tok) {
            let op_tok = self.current_tok.clone();
            res.register_advancement();
            self.advance();
            let right = match res.register(func_b(self)) {
                Some(r) => r,
                None => return res,
            };
            left = Node::BinOp(BinOpNode::new(left, op_tok, right));
        }

        res.success(left)
    }

    fn statements(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let mut statements = Vec::new();
        let pos_start = self.current_tok.start.clone();

        while self.current_tok.kind == TokenType::Newline {
            res.register_advancement();
            self.advance();
        }

        let first = match res.register(self.statement()) {
            Some(s) => s,
            None => return res,
        };
        statements.push(first);

        let mut more_statements = true;
        loop {
            let mut newline_count = 0;
            while self.current_tok.kind == TokenType::Newline {
                res.register_advancement();
                self.advance();
                newline_count += 1;
            }
            if newline_count == 0 {
                more_statements = false;
            }
            if !more_statements {
                break;
            }

            let stmt_res = self.statement();
            match res.try_register(stmt_res) {
                Some(stmt) => statements.push(stmt),
                None => {
                    self.reverse(res.to_reverse_count);
                    more_statements = false;
                }
            }
        }

        let end = self.current_tok.end.clone();
        res.success(Node::List(ListNode::new(statements, pos_start, end)))
    }

    fn statement(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let pos_start = self.current_tok.start.clone();

        if self.current_tok.is_keyword("RETURN") {
            res.register_advancement();
            self.advance();

            let expr_res = self.expr();
            let expr = res.try_register(expr_res);
            if expr.is_none() {
                self.reverse(res.to_reverse_count);
            }
            let end = self.current_tok.end.clone();
            return res.success(Node::Return(ReturnNode::new(expr, pos_start, end)));
        }

        if self.current_tok.is_keyword("CONTINUE") {
            res.register_advancement();
            self.advance();
            let end = self.current_tok.end.clone();
            return res.success(Node::Continue(ContinueNode::new(pos_start, end)));
        }

        if self.current_tok.is_keyword("BREAK") {
            res.register_advancement();
            self.advance();
            let end = self.current_tok.end.clone();
            return res.success(Node::Break(BreakNode::new(pos_start, end)));
        }

        let expr = match res.register(self.expr()) {
            Some(e) => e,
            None => {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected 'RETURN', 'CONTINUE', 'BREAK', 'VAR', int, float, identifier, '+', '-', '(', '[' or 'NOT'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ))
            }
        };
        res.success(expr)
    }

    fn expr(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();

        if self.current_tok.is_keyword("VAR") {
            res.register_advancement();
            self.advance();

            if self.current_tok.kind != TokenType::Identifier {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected identifier",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            let var_name = self.current_tok.clone();
            res.register_advancement();
            self.advance();

            if self.current_tok.kind != TokenType::Eq {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected '='",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            res.register_advancement();
            self.advance();

            let value = match res.register(self.expr()) {
                Some(v) => v,
                None => return res,
            };
            return res.success(Node::VarAssign(VarAssignNode::new(var_name, value)));
        }

        let node = match res.register(self.bin_op(
            Self::comp_expr,
            BinOpMatcher::Keywords(&["AND", "OR"]),
            Self::comp_expr,
        )) {
            Some(n) => n,
            None => {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected 'VAR', int, float, identifier, '+', '-', '(', '[' or 'NOT'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ))
            }
        };
        res.success(node)
    }

    fn comp_expr(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();

        if self.current_tok.is_keyword("NOT") {
            let op_tok = self.current_tok.clone();
            res.register_advancement();
            self.advance();

            let node = match res.register(self.comp_expr()) {
                Some(n) => n,
                None => return res,
            };
            return res.success(Node::UnaryOp(UnaryOpNode::new(op_tok, node)));
        }

        let node = match res.register(self.bin_op(
            Self::arith_expr,
            BinOpMatcher::Tokens(&[
                TokenType::Ee,
                TokenType::Ne,
                TokenType::Lt,
                TokenType::Gt,
                TokenType::Lte,
                TokenType::Gte,
            ]),
            Self::arith_expr,
        )) {
            Some(n) => n,
            None => {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected int, float, identifier, '+', '-', '(', '[', 'IF', 'FOR', 'WHILE', 'DEF' or 'NOT'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ))
            }
        };
        res.success(node)
    }

    fn arith_expr(&mut self) -> ParseResult<Node> {
        self.bin_op(
            Self::term,
            BinOpMatcher::Tokens(&[TokenType::Sum, TokenType::Minus]),
            Self::term,
        )
    }

    fn term(&mut self) -> ParseResult<Node> {
        self.bin_op(
            Self::factor,
            BinOpMatcher::Tokens(&[TokenType::Mul, TokenType::Div]),
            Self::factor,
        )
    }

    fn factor(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let tok = self.current_tok.clone();

        if tok.kind == TokenType::Sum || tok.kind == TokenType::Minus {
            res.register_advancement();
            self.advance();
            let factor = match res.register(self.factor()) {
                Some(f) => f,
                None => return res,
            };
            return res.success(Node::UnaryOp(UnaryOpNode::new(tok, factor)));
        }

        self.power()
    }

    fn power(&mut self) -> ParseResult<Node> {
        self.bin_op(Self::call, BinOpMatcher::Tokens(&[TokenType::Pow]), Self::factor)
    }

    fn call(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let atom = match res.register(self.atom()) {
            Some(a) => a,
            None => return res,
        };

        if self.current_tok.kind == TokenType::LParen {
            res.register_advancement();
            self.advance();
            let mut arg_nodes = Vec::new();

            if self.current_tok.kind == TokenType::RParen {
                res.register_advancement();
                self.advance();
            } else {
                let first = match res.register(self.expr()) {
                    Some(e) => e,
                    None => {
                        return res.failure(Diagnostic::invalid_syntax(
                            "Expected ')', 'VAR', int, float, identifier, '+', '-', '(', '[' or 'NOT'",
                            self.current_tok.start.clone(),
                            self.current_tok.end.clone(),
                        ))
                    }
                };
                arg_nodes.push(first);

                while self.current_tok.kind == TokenType::Comma {
                    res.register_advancement();
                    self.advance();
                    let next = match res.register(self.expr()) {
                        Some(e) => e,
                        None => return res,
                    };
                    arg_nodes.push(next);
                }

                if self.current_tok.kind != TokenType::RParen {
                    return res.failure(Diagnostic::invalid_syntax(
                        "Expected ',' or ')'",
                        self.current_tok.start.clone(),
                        self.current_tok.end.clone(),
                    ));
                }
                res.register_advancement();
                self.advance();
            }

            let end = self.current_tok.end.clone();
            return res.success(Node::Call(CallNode::new(atom, arg_nodes, end)));
        }

        res.success(atom)
    }

    fn atom(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let tok = self.current_tok.clone();

        match tok.kind {
            TokenType::Int | TokenType::Float => {
                res.register_advancement();
                self.advance();
                res.success(Node::Number(NumberNode::new(tok)))
            }
            TokenType::String => {
                res.register_advancement();
                self.advance();
                res.success(Node::String(StringNode::new(tok)))
            }
            TokenType::Identifier => {
                res.register_advancement();
                self.advance();
                res.success(Node::VarAccess(VarAccessNode::new(tok)))
            }
            TokenType::LParen => {
                res.register_advancement();
                self.advance();
                let expr = match res.register(self.expr()) {
                    Some(e) => e,
                    None => return res,
                };
                if self.current_tok.kind == TokenType::RParen {
                    res.register_advancement();
                    self.advance();
                    res.success(expr)
                } else {
                    res.failure(Diagnostic::invalid_syntax(
                        "Expected ')'",
                        self.current_tok.start.clone(),
                        self.current_tok.end.clone(),
                    ))
                }
            }
            TokenType::LSquare => {
                let list_expr = match res.register(self.list_expr()) {
                    Some(l) => l,
                    None => return res,
                };
                res.success(list_expr)
            }
            TokenType::Keyword if tok.is_keyword("IF") => {
                let if_expr = match res.register(self.if_expr()) {
                    Some(n) => n,
                    None => return res,
                };
                res.success(if_expr)
            }
            TokenType::Keyword if tok.is_keyword("FOR") => {
                let for_expr = match res.register(self.for_expr()) {
                    Some(n) => n,
                    None => return res,
                };
                res.success(for_expr)
            }
            TokenType::Keyword if tok.is_keyword("WHILE") => {
                let while_expr = match res.register(self.while_expr()) {
                    Some(n) => n,
                    None => return res,
                };
                res.success(while_expr)
            }
            TokenType::Keyword if tok.is_keyword("DEF") => {
                let func_def = match res.register(self.func_def()) {
                    Some(n) => n,
                    None => return res,
                };
                res.success(func_def)
            }
            _ => res.failure(Diagnostic::invalid_syntax(
                "Expected int, float, identifier, '+', '-', '(', '[', 'IF', 'FOR', 'WHILE' or 'DEF'",
                tok.start.clone(),
                tok.end.clone(),
            )),
        }
    }

    fn list_expr(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let mut element_nodes = Vec::new();
        let start = self.current_tok.start.clone();

        if self.current_tok.kind != TokenType::LSquare {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected '['",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current_tok.kind == TokenType::RSquare {
            res.register_advancement();
            self.advance();
        } else {
            let first = match res.register(self.expr()) {
                Some(e) => e,
                None => {
                    return res.failure(Diagnostic::invalid_syntax(
                        "Expected ']', 'VAR', int, float, identifier, '+', '-', '(', '[' or 'NOT'",
                        self.current_tok.start.clone(),
                        self.current_tok.end.clone(),
                    ))
                }
            };
            element_nodes.push(first);

            while self.current_tok.kind == TokenType::Comma {
                res.register_advancement();
                self.advance();
                let next = match res.register(self.expr()) {
                    Some(e) => e,
                    None => return res,
                };
                element_nodes.push(next);
            }

            if self.current_tok.kind != TokenType::RSquare {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected ',' or ']'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            res.register_advancement();
            self.advance();
        }

        let end = self.current_tok.end.clone();
        res.success(Node::List(ListNode::new(element_nodes, start, end)))
    }

    /// Parses `IF <cond> THEN <body>` and any trailing `ELIF`/`ELSE` chain.
    fn if_expr(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();
        let (cases, else_case) = match res.register(self.if_expr_cases("IF")) {
            Some(c) => c,
            None => return res,
        };
        res.success(Node::If(IfNode::new(cases, else_case)))
    }

    fn if_expr_b(&mut self) -> ParseResult<(Vec<IfCase>, Option<ElseCase>)> {
        self.if_expr_cases("ELIF")
    }

    fn if_expr_c(&mut self) -> ParseResult<Option<ElseCase>> {
        let mut res = ParseResult::new();
        let mut else_case = None;

        if self.current_tok.is_keyword("ELSE") {
            res.register_advancement();
            self.advance();

            if self.current_tok.kind == TokenType::Newline {
                res.register_advancement();
                self.advance();

                let statements = match res.register(self.statements()) {
                    Some(s) => s,
                    None => return res,
                };
                else_case = Some(ElseCase {
                    body: statements,
                    returns_unit: true,
                });

                if self.current_tok.is_keyword("END") {
                    res.register_advancement();
                    self.advance();
                } else {
                    return res.failure(Diagnostic::invalid_syntax(
                        "Expected 'END'",
                        self.current_tok.start.clone(),
                        self.current_tok.end.clone(),
                    ));
                }
            } else {
                let expr = match res.register(self.statement()) {
                    Some(e) => e,
                    None => return res,
                };
                else_case = Some(ElseCase {
                    body: expr,
                    returns_unit: false,
                });
            }
        }

        res.success(else_case)
    }

    fn if_expr_b_or_c(&mut self) -> ParseResult<(Vec<IfCase>, Option<ElseCase>)> {
        let mut res = ParseResult::new();
        let mut cases = Vec::new();
        let mut else_case = None;

        if self.current_tok.is_keyword("ELIF") {
            let (new_cases, new_else) = match res.register(self.if_expr_b()) {
                Some(v) => v,
                None => return res,
            };
            cases = new_cases;
            else_case = new_else;
        } else {
            else_case = match res.register(self.if_expr_c()) {
                Some(v) => v,
                None => return res,
            };
        }

        res.success((cases, else_case))
    }

    fn if_expr_cases(&mut self, case_keyword: &str) -> ParseResult<(Vec<IfCase>, Option<ElseCase>)> {
        let mut res = ParseResult::new();
        let mut cases = Vec::new();
        let mut else_case = None;

        if !self.current_tok.is_keyword(case_keyword) {
            return res.failure(Diagnostic::invalid_syntax(
                format!("Expected '{}'", case_keyword),
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        let condition = match res.register(self.expr()) {
            Some(c) => c,
            None => return res,
        };

        if !self.current_tok.is_keyword("THEN") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'THEN'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current_tok.kind == TokenType::Newline {
            res.register_advancement();
            self.advance();

            let statements = match res.register(self.statements()) {
                Some(s) => s,
                None => return res,
            };
            cases.push(IfCase {
                condition,
                body: statements,
                returns_unit: true,
            });

            if self.current_tok.is_keyword("END") {
                res.register_advancement();
                self.advance();
            } else {
                let (new_cases, new_else) = match res.register(self.if_expr_b_or_c()) {
                    Some(v) => v,
                    None => return res,
                };
                cases.extend(new_cases);
                else_case = new_else;
            }
        } else {
            let expr = match res.register(self.statement()) {
                Some(e) => e,
                None => return res,
            };
            cases.push(IfCase {
                condition,
                body: expr,
                returns_unit: false,
            });

            let (new_cases, new_else) = match res.register(self.if_expr_b_or_c()) {
                Some(v) => v,
                None => return res,
            };
            cases.extend(new_cases);
            else_case = new_else;
        }

        res.success((cases, else_case))
    }

    fn for_expr(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();

        if !self.current_tok.is_keyword("FOR") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'FOR'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current_tok.kind != TokenType::Identifier {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected identifier",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        let var_name = self.current_tok.clone();
        res.register_advancement();
        self.advance();

        if self.current_tok.kind != TokenType::Eq {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected '='",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        let start_value = match res.register(self.expr()) {
            Some(v) => v,
            None => return res,
        };

        if !self.current_tok.is_keyword("TO") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'TO'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        let end_value = match res.register(self.expr()) {
            Some(v) => v,
            None => return res,
        };

        let step_value = if self.current_tok.is_keyword("STEP") {
            res.register_advancement();
            self.advance();
            match res.register(self.expr()) {
                Some(v) => Some(v),
                None => return res,
            }
        } else {
            None
        };

        if !self.current_tok.is_keyword("THEN") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'THEN'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current_tok.kind == TokenType::Newline {
            res.register_advancement();
            self.advance();

            let body = match res.register(self.statements()) {
                Some(b) => b,
                None => return res,
            };

            if !self.current_tok.is_keyword("END") {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected 'END'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            res.register_advancement();
            self.advance();

            return res.success(Node::For(ForNode::new(
                var_name,
                start_value,
                end_value,
                step_value,
                body,
                true,
            )));
        }

        let body = match res.register(self.statement()) {
            Some(b) => b,
            None => return res,
        };
        res.success(Node::For(ForNode::new(
            var_name,
            start_value,
            end_value,
            step_value,
            body,
            false,
        )))
    }

    fn while_expr(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();

        if !self.current_tok.is_keyword("WHILE") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'WHILE'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        let condition = match res.register(self.expr()) {
            Some(c) => c,
            None => return res,
        };

        if !self.current_tok.is_keyword("THEN") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'THEN'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current_tok.kind == TokenType::Newline {
            res.register_advancement();
            self.advance();

            let body = match res.register(self.statements()) {
                Some(b) => b,
                None => return res,
            };

            if !self.current_tok.is_keyword("END") {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected 'END'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            res.register_advancement();
            self.advance();

            return res.success(Node::While(WhileNode::new(condition, body, true)));
        }

        let body = match res.register(self.statement()) {
            Some(b) => b,
            None => return res,
        };
        res.success(Node::While(WhileNode::new(condition, body, false)))
    }

    fn func_def(&mut self) -> ParseResult<Node> {
        let mut res = ParseResult::new();

        if !self.current_tok.is_keyword("DEF") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'DEF'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        let def_start = self.current_tok.start.clone();
        res.register_advancement();
        self.advance();

        let var_name_tok = if self.current_tok.kind == TokenType::Identifier {
            let tok = self.current_tok.clone();
            res.register_advancement();
            self.advance();
            if self.current_tok.kind != TokenType::LParen {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected '('",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            Some(tok)
        } else {
            if self.current_tok.kind != TokenType::LParen {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected identifier or '('",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
            None
        };
        res.register_advancement();
        self.advance();

        let mut arg_name_toks = Vec::new();
        if self.current_tok.kind == TokenType::Identifier {
            arg_name_toks.push(self.current_tok.clone());
            res.register_advancement();
            self.advance();

            while self.current_tok.kind == TokenType::Comma {
                res.register_advancement();
                self.advance();
                if self.current_tok.kind != TokenType::Identifier {
                    return res.failure(Diagnostic::invalid_syntax(
                        "Expected identifier",
                        self.current_tok.start.clone(),
                        self.current_tok.end.clone(),
                    ));
                }
                arg_name_toks.push(self.current_tok.clone());
                res.register_advancement();
                self.advance();
            }

            if self.current_tok.kind != TokenType::RParen {
                return res.failure(Diagnostic::invalid_syntax(
                    "Expected ',' or ')'",
                    self.current_tok.start.clone(),
                    self.current_tok.end.clone(),
                ));
            }
        } else if self.current_tok.kind != TokenType::RParen {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected identifier or ')'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current_tok.kind == TokenType::Arrow {
            res.register_advancement();
            self.advance();
            let body = match res.register(self.expr()) {
                Some(b) => b,
                None => return res,
            };
            return res.success(Node::FuncDef(FuncDefNode::new(
                var_name_tok,
                arg_name_toks,
                body,
                true,
                def_start,
            )));
        }

        if self.current_tok.kind != TokenType::Newline {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected '->' or newline",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        let body = match res.register(self.statements()) {
            Some(b) => b,
            None => return res,
        };

        if !self.current_tok.is_keyword("END") {
            return res.failure(Diagnostic::invalid_syntax(
                "Expected 'END'",
                self.current_tok.start.clone(),
                self.current_tok.end.clone(),
            ));
        }
        res.register_advancement();
        self.advance();

        res.success(Node::FuncDef(FuncDefNode::new(
            var_name_tok,
            arg_name_toks,
            body,
            false,
            def_start,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(text: &str) -> ParseResult<Node> {
        let tokens = Lexer::new("<test>", text).make_tokens().expect("lex ok");
        Parser::new(tokens).parse()
    }

    #[test]
    fn parses_simple_arithmetic() {
        let res = parse("1 + 2 * 3");
        assert!(res.error.is_none());
        assert!(res.node.is_some());
    }

    #[test]
    fn block_if_blocks_trailing_elif() {
        // a block IF's END terminates the whole chain; a following ELSE
        // on its own becomes a dangling token and must fail to parse.
        let res = parse("IF 1 THEN\nPRINT(1)\nEND\nELSE\nPRINT(2)\nEND");
        assert!(res.error.is_some());
    }

    #[test]
    fn inline_if_elif_else_chains() {
        let res = parse("IF 0 THEN 1 ELIF 0 THEN 2 ELSE 3");
        assert!(res.error.is_none());
    }

    #[test]
    fn missing_then_is_invalid_syntax() {
        let res = parse("IF 1 PRINT(1)");
        assert!(res.error.is_some());
    }

    #[test]
    fn func_def_inline_and_block_forms() {
        assert!(parse("DEF add(a, b) -> a + b").error.is_none());
        assert!(parse("DEF add(a, b)\nRETURN a + b\nEND").error.is_none());
    }
}
