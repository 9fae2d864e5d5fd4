//! Shared test fixtures and a small formula evaluator
//!
//! The library never evaluates the formulas it emits. Tests use this
//! evaluator to check what a spreadsheet engine would compute from them.
//! It covers exactly the grammar the generator produces: numbers, A1
//! references, + - * /, comparisons, IF, AND, MAX, ROUNDUP and IFERROR.

#![allow(dead_code)]

use royalbit_ratio_forge::types::{CellValue, Dataset};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

pub const ROSTER_HEADERS: [&str; 6] = [
    "Centre Code",
    "Centre Name",
    "10-Mar Shift 1",
    "10-Mar Shift 2",
    "Mar Total",
    "Total Candidate",
];

/// (code, name, shift1, shift2) rows; Mar Total and Total Candidate are derived
pub const ROSTER_ROWS: [(f64, &str, f64, f64); 3] = [
    (101.0, "North School", 120.0, 80.0),
    (102.0, "South School", 0.0, 45.0),
    (103.0, "East College", 408.0, 350.0),
];

pub fn roster_dataset() -> Dataset {
    let headers = ROSTER_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows = ROSTER_ROWS
        .iter()
        .map(|(code, name, s1, s2)| {
            vec![
                CellValue::Number(*code),
                CellValue::Text(name.to_string()),
                CellValue::Number(*s1),
                CellValue::Number(*s2),
                CellValue::Number(s1 + s2),
                CellValue::Number(s1 + s2),
            ]
        })
        .collect();
    Dataset::with_rows(headers, rows).unwrap()
}

/// Write a roster workbook with the given headers and numeric rows
pub fn write_workbook(path: &Path, sheet: &str, headers: &[&str], rows: &[Vec<f64>]) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name(sheet).unwrap();
    for (c, h) in headers.iter().enumerate() {
        ws.write_string(0, c as u16, *h).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            ws.write_number(r as u32 + 1, c as u16, *v).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// Write the standard roster fixture to `dir/roster.xlsx`
pub fn write_roster(dir: &Path) -> PathBuf {
    let path = dir.join("roster.xlsx");
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Sheet1").unwrap();
    for (c, h) in ROSTER_HEADERS.iter().enumerate() {
        ws.write_string(0, c as u16, *h).unwrap();
    }
    for (r, (code, name, s1, s2)) in ROSTER_ROWS.iter().enumerate() {
        let row = r as u32 + 1;
        ws.write_number(row, 0, *code).unwrap();
        ws.write_string(row, 1, *name).unwrap();
        ws.write_number(row, 2, *s1).unwrap();
        ws.write_number(row, 3, *s2).unwrap();
        ws.write_number(row, 4, s1 + s2).unwrap();
        ws.write_number(row, 5, s1 + s2).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMULA EVALUATOR
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(String),
    LParen,
    RParen,
    Comma,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '+' | '-' | '*' | '/' | '=' => {
                tokens.push(Token::Op(c.to_string()));
                i += 1;
            }
            '<' | '>' => {
                let mut op = c.to_string();
                if let Some(next) = chars.get(i + 1) {
                    if *next == '=' || (c == '<' && *next == '>') {
                        op.push(*next);
                        i += 1;
                    }
                }
                tokens.push(Token::Op(op));
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(
                    text.parse().map_err(|_| format!("bad number {}", text))?,
                ));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }
    Ok(tokens)
}

struct Evaluator<'a> {
    tokens: Vec<Token>,
    pos: usize,
    cells: &'a HashMap<String, f64>,
}

type EvalResult = Result<f64, String>;

impl<'a> Evaluator<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expect(&mut self, token: Token) -> Result<(), String> {
        match self.next() {
            Some(t) if t == token => Ok(()),
            other => Err(format!("expected {:?}, got {:?}", token, other)),
        }
    }

    fn peek_op(&self, ops: &[&str]) -> Option<String> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(&op.as_str()) => Some(op.clone()),
            _ => None,
        }
    }

    fn comparison(&mut self) -> EvalResult {
        let left = self.additive()?;
        if let Some(op) = self.peek_op(&["=", "<>", "<", "<=", ">", ">="]) {
            self.pos += 1;
            let right = self.additive()?;
            let result = match op.as_str() {
                "=" => left == right,
                "<>" => left != right,
                "<" => left < right,
                "<=" => left <= right,
                ">" => left > right,
                _ => left >= right,
            };
            return Ok(if result { 1.0 } else { 0.0 });
        }
        Ok(left)
    }

    fn additive(&mut self) -> EvalResult {
        let mut value = self.term()?;
        while let Some(op) = self.peek_op(&["+", "-"]) {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == "+" { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> EvalResult {
        let mut value = self.unary()?;
        while let Some(op) = self.peek_op(&["*", "/"]) {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == "*" {
                value * rhs
            } else if rhs == 0.0 {
                return Err("#DIV/0!".to_string());
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> EvalResult {
        if self.peek_op(&["-"]).is_some() {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> EvalResult {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let v = self.comparison()?;
                self.expect(Token::RParen)?;
                Ok(v)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    self.function(&name)
                } else {
                    self.cells
                        .get(&name)
                        .copied()
                        .ok_or_else(|| format!("unknown cell {}", name))
                }
            }
            other => Err(format!("unexpected token {:?}", other)),
        }
    }

    /// Arguments are evaluated eagerly; errors are kept per argument so
    /// IFERROR and IF can ignore failures in branches they do not take.
    fn arguments(&mut self) -> Result<Vec<EvalResult>, String> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            let start = self.pos;
            let value = self.comparison();
            if value.is_err() {
                self.skip_argument(start);
            }
            args.push(value);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => break,
                other => return Err(format!("bad argument list near {:?}", other)),
            }
        }
        Ok(args)
    }

    /// After a failed argument, move to the following `,` or `)` at depth 0
    fn skip_argument(&mut self, start: usize) {
        self.pos = start;
        let mut depth = 0;
        while let Some(t) = self.peek() {
            match t {
                Token::LParen => depth += 1,
                Token::RParen if depth == 0 => return,
                Token::RParen => depth -= 1,
                Token::Comma if depth == 0 => return,
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn function(&mut self, name: &str) -> EvalResult {
        let args = self.arguments()?;
        let arg = |i: usize| -> EvalResult {
            args.get(i)
                .cloned()
                .unwrap_or_else(|| Err(format!("{} missing argument {}", name, i)))
        };

        match name {
            "IF" => {
                if arg(0)? != 0.0 {
                    arg(1)
                } else {
                    arg(2)
                }
            }
            "AND" => {
                for a in &args {
                    if a.clone()? == 0.0 {
                        return Ok(0.0);
                    }
                }
                Ok(1.0)
            }
            "MAX" => {
                let mut best = f64::NEG_INFINITY;
                for a in &args {
                    best = best.max(a.clone()?);
                }
                Ok(best)
            }
            "ROUNDUP" => {
                let value = arg(0)?;
                let factor = 10f64.powi(arg(1)? as i32);
                let scaled = (value.abs() * factor).ceil() / factor;
                Ok(scaled.copysign(value))
            }
            "IFERROR" => arg(0).or_else(|_| arg(1)),
            other => Err(format!("unsupported function {}", other)),
        }
    }
}

/// Evaluate `formula` (with or without a leading `=`) against named cells
pub fn evaluate(formula: &str, cells: &HashMap<String, f64>) -> EvalResult {
    let body = formula.strip_prefix('=').unwrap_or(formula);
    let mut evaluator = Evaluator {
        tokens: tokenize(body)?,
        pos: 0,
        cells,
    };
    let value = evaluator.comparison()?;
    if evaluator.pos != evaluator.tokens.len() {
        return Err(format!("trailing input in {}", formula));
    }
    Ok(value)
}

/// Build a cell map from `(address, value)` pairs
pub fn cells(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_evaluator_basics() {
    let c = cells(&[("A1", 7.0), ("B1", 0.0)]);
    assert_eq!(evaluate("=A1*2+1", &c).unwrap(), 15.0);
    assert_eq!(evaluate("=ROUNDUP(A1/2,0)", &c).unwrap(), 4.0);
    assert_eq!(evaluate("=IF(A1>5,1,0)", &c).unwrap(), 1.0);
    assert_eq!(evaluate("=MAX(A1,B1,3)", &c).unwrap(), 7.0);
    assert!(evaluate("=A1/B1", &c).is_err());
    assert_eq!(evaluate("=IFERROR(ROUNDUP(A1/B1,0),0)", &c).unwrap(), 0.0);
}
