//! Parser for the `OpenQASM` 2/3 subset.
//!
//! Gate parameters are constant-folded during parsing, so the resulting
//! [`Circuit`] is always fully bound.

use std::collections::HashMap;

use quilt_ir::{Circuit, Gate, Instruction, QubitId};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a QASM source string into a Circuit.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// A declared quantum register: base wire offset and size.
struct QuantumRegister {
    offset: usize,
    size: usize,
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    qregs: HashMap<String, QuantumRegister>,
    cregs: HashMap<String, usize>,
    num_qubits: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let token_results = tokenize(source);
        let mut tokens = Vec::new();

        for result in token_results {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, msg)) => {
                    return Err(ParseError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            qregs: HashMap::new(),
            cregs: HashMap::new(),
            num_qubits: 0,
        })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        if self.is_eof() {
            return None;
        }
        let token = self.tokens[self.pos].token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "identifier".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    fn parse_int_literal(&mut self) -> ParseResult<u64> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v),
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "integer literal".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("integer literal".into())),
        }
    }

    /// Parse the entire program.
    fn parse_program(&mut self) -> ParseResult<Circuit> {
        self.expect(Token::OpenQasm)?;
        self.parse_version()?;
        self.expect(Token::Semicolon)?;

        let mut instructions: Vec<Instruction> = Vec::new();

        while !self.is_eof() {
            self.parse_statement(&mut instructions)?;
        }

        let mut circuit = Circuit::with_size("main", self.num_qubits);
        for inst in instructions {
            circuit.push(inst)?;
        }
        Ok(circuit)
    }

    /// Parse and validate the version number. Both 2.x and 3.x are accepted.
    fn parse_version(&mut self) -> ParseResult<()> {
        let version = match self.advance() {
            Some(Token::FloatLiteral(v)) => v,
            Some(Token::IntLiteral(v)) => v as f64,
            Some(other) => return Err(ParseError::InvalidVersion(other.to_string())),
            None => return Err(ParseError::UnexpectedEof("version number".into())),
        };
        if !(2.0..4.0).contains(&version) {
            return Err(ParseError::InvalidVersion(format!("{version}")));
        }
        Ok(())
    }

    fn parse_statement(&mut self, instructions: &mut Vec<Instruction>) -> ParseResult<()> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qreg => self.parse_qreg_decl(true),
            Token::Qubit => self.parse_qubit_decl(),
            Token::Creg => self.parse_creg_decl(true),
            Token::Bit => self.parse_bit_decl(),
            Token::Measure => self.parse_measure(instructions),
            Token::Barrier => self.parse_barrier(instructions),
            Token::Identifier(_) => self.parse_identifier_statement(instructions),
            _ => Err(ParseError::UnexpectedToken {
                expected: "statement".into(),
                found: token.to_string(),
            }),
        }
    }

    /// Parse and discard an include statement.
    fn parse_include(&mut self) -> ParseResult<()> {
        self.expect(Token::Include)?;
        match self.advance() {
            Some(Token::StringLiteral(_)) => {}
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    expected: "string literal".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        }
        self.expect(Token::Semicolon)
    }

    /// Parse QASM2 register declaration: `qreg q[n];`
    fn parse_qreg_decl(&mut self, quantum: bool) -> ParseResult<()> {
        self.advance();
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = self.parse_int_literal()? as usize;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;
        if quantum {
            self.declare_qreg(name, size)
        } else {
            self.declare_creg(name, size)
        }
    }

    /// Parse QASM3 qubit declaration: `qubit[n] q;` or `qubit q;`
    fn parse_qubit_decl(&mut self) -> ParseResult<()> {
        self.expect(Token::Qubit)?;
        let size = self.parse_optional_width()?;
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        self.declare_qreg(name, size)
    }

    /// Parse QASM2 classical register: `creg c[n];`
    fn parse_creg_decl(&mut self, quantum: bool) -> ParseResult<()> {
        self.parse_qreg_decl(quantum)
    }

    /// Parse QASM3 bit declaration: `bit[n] c;` or `bit c;`
    fn parse_bit_decl(&mut self) -> ParseResult<()> {
        self.expect(Token::Bit)?;
        let size = self.parse_optional_width()?;
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        self.declare_creg(name, size)
    }

    fn parse_optional_width(&mut self) -> ParseResult<usize> {
        if self.consume(&Token::LBracket) {
            let size = self.parse_int_literal()? as usize;
            self.expect(Token::RBracket)?;
            Ok(size)
        } else {
            Ok(1)
        }
    }

    fn declare_qreg(&mut self, name: String, size: usize) -> ParseResult<()> {
        if self.qregs.contains_key(&name) {
            return Err(ParseError::DuplicateRegister(name));
        }
        self.qregs.insert(
            name,
            QuantumRegister {
                offset: self.num_qubits,
                size,
            },
        );
        self.num_qubits += size;
        Ok(())
    }

    fn declare_creg(&mut self, name: String, size: usize) -> ParseResult<()> {
        if self.cregs.contains_key(&name) {
            return Err(ParseError::DuplicateRegister(name));
        }
        self.cregs.insert(name, size);
        Ok(())
    }

    /// Parse one qubit operand: `q` (whole register) or `q[i]` (single wire).
    fn parse_qubit_operand(&mut self) -> ParseResult<Vec<QubitId>> {
        let name = self.parse_identifier()?;
        let reg = self
            .qregs
            .get(&name)
            .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
        let (offset, size) = (reg.offset, reg.size);

        if self.consume(&Token::LBracket) {
            let index = self.parse_int_literal()? as usize;
            self.expect(Token::RBracket)?;
            if index >= size {
                return Err(ParseError::IndexOutOfBounds {
                    register: name,
                    index,
                    size,
                });
            }
            Ok(vec![QubitId::from(offset + index)])
        } else {
            Ok((0..size).map(|i| QubitId::from(offset + i)).collect())
        }
    }

    /// Parse a comma-separated list of qubit operands.
    fn parse_qubit_operands(&mut self) -> ParseResult<Vec<Vec<QubitId>>> {
        let mut operands = vec![self.parse_qubit_operand()?];
        while self.consume(&Token::Comma) {
            operands.push(self.parse_qubit_operand()?);
        }
        Ok(operands)
    }

    /// Parse and discard a classical bit reference: `c` or `c[i]`.
    fn parse_bit_target(&mut self) -> ParseResult<()> {
        let name = self.parse_identifier()?;
        let size = *self
            .cregs
            .get(&name)
            .ok_or_else(|| ParseError::UndefinedRegister(name.clone()))?;
        if self.consume(&Token::LBracket) {
            let index = self.parse_int_literal()? as usize;
            self.expect(Token::RBracket)?;
            if index >= size {
                return Err(ParseError::IndexOutOfBounds {
                    register: name,
                    index,
                    size,
                });
            }
        }
        Ok(())
    }

    /// Parse measure statement: `measure q;` or `measure q[0] -> c[0];`
    fn parse_measure(&mut self, instructions: &mut Vec<Instruction>) -> ParseResult<()> {
        self.expect(Token::Measure)?;
        let qubits = self.parse_qubit_operand()?;
        if self.consume(&Token::Arrow) {
            self.parse_bit_target()?;
        }
        self.expect(Token::Semicolon)?;
        for q in qubits {
            instructions.push(Instruction::measure(q));
        }
        Ok(())
    }

    /// Parse barrier statement.
    fn parse_barrier(&mut self, instructions: &mut Vec<Instruction>) -> ParseResult<()> {
        self.expect(Token::Barrier)?;
        let qubits: Vec<QubitId> = if self.check(&Token::Semicolon) {
            (0..self.num_qubits).map(QubitId::from).collect()
        } else {
            self.parse_qubit_operands()?.into_iter().flatten().collect()
        };
        self.expect(Token::Semicolon)?;
        instructions.push(Instruction::barrier(qubits));
        Ok(())
    }

    /// Parse a statement starting with an identifier: a gate call, or the
    /// QASM3 measurement form `c = measure q;`.
    fn parse_identifier_statement(
        &mut self,
        instructions: &mut Vec<Instruction>,
    ) -> ParseResult<()> {
        let name = self.parse_identifier()?;

        if self.check(&Token::Eq)
            || (self.check(&Token::LBracket) && self.assignment_follows_index())
        {
            if self.consume(&Token::LBracket) {
                self.parse_int_literal()?;
                self.expect(Token::RBracket)?;
            }
            self.expect(Token::Eq)?;
            self.expect(Token::Measure)?;
            let qubits = self.parse_qubit_operand()?;
            self.expect(Token::Semicolon)?;
            for q in qubits {
                instructions.push(Instruction::measure(q));
            }
            return Ok(());
        }

        self.parse_gate_call(name, instructions)
    }

    /// Look ahead past `[int]` for an `=`, distinguishing `c[0] = measure ...`
    /// from an indexed gate operand.
    fn assignment_follows_index(&self) -> bool {
        matches!(
            (
                self.tokens.get(self.pos + 1).map(|t| &t.token),
                self.tokens.get(self.pos + 2).map(|t| &t.token),
                self.tokens.get(self.pos + 3).map(|t| &t.token),
            ),
            (
                Some(Token::IntLiteral(_)),
                Some(Token::RBracket),
                Some(Token::Eq)
            )
        )
    }

    /// Parse a gate call and append the resulting instructions.
    ///
    /// Register operands broadcast the way QASM2 defines it: each operand is
    /// either a single wire or a register, registers must all have the same
    /// length, and the gate is applied element-wise.
    fn parse_gate_call(
        &mut self,
        name: String,
        instructions: &mut Vec<Instruction>,
    ) -> ParseResult<()> {
        let params = if self.consume(&Token::LParen) {
            let p = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            p
        } else {
            vec![]
        };

        let operands = self.parse_qubit_operands()?;
        self.expect(Token::Semicolon)?;

        let gate = resolve_gate(&name, &params)?;
        let arity = gate.num_qubits() as usize;
        if operands.len() != arity {
            return Err(ParseError::WrongQubitCount {
                gate: name,
                expected: arity,
                got: operands.len(),
            });
        }

        let reps = operands.iter().map(Vec::len).max().unwrap_or(1);
        for operand in &operands {
            if operand.len() != 1 && operand.len() != reps {
                return Err(ParseError::Generic(format!(
                    "mismatched register lengths in '{name}' operands"
                )));
            }
        }

        for i in 0..reps {
            let qubits: Vec<QubitId> = operands
                .iter()
                .map(|op| if op.len() == 1 { op[0] } else { op[i] })
                .collect();
            instructions.push(Instruction::gate(gate.clone(), qubits));
        }
        Ok(())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression_list(&mut self) -> ParseResult<Vec<f64>> {
        let mut exprs = vec![self.parse_expression()?];
        while self.consume(&Token::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }

    fn parse_expression(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            if self.consume(&Token::Plus) {
                value += self.parse_term()?;
            } else if self.consume(&Token::Minus) {
                value -= self.parse_term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_term(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_unary()?;
        loop {
            if self.consume(&Token::Star) {
                value *= self.parse_unary()?;
            } else if self.consume(&Token::Slash) {
                value /= self.parse_unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_unary(&mut self) -> ParseResult<f64> {
        if self.consume(&Token::Minus) {
            Ok(-self.parse_unary()?)
        } else {
            self.parse_atom()
        }
    }

    fn parse_atom(&mut self) -> ParseResult<f64> {
        match self.advance() {
            Some(Token::Pi) => Ok(std::f64::consts::PI),
            Some(Token::FloatLiteral(v)) => Ok(v),
            Some(Token::IntLiteral(v)) => Ok(v as f64),
            Some(Token::LParen) => {
                let value = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "expression".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("expression".into())),
        }
    }
}

/// Resolve a gate name and parameter list to a [`Gate`].
///
/// Includes the legacy `u1`/`u2`/`u3` spellings emitted by older toolchains.
fn resolve_gate(name: &str, params: &[f64]) -> ParseResult<Gate> {
    let check = |expected: usize| -> ParseResult<()> {
        if params.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongParameterCount {
                gate: name.to_string(),
                expected,
                got: params.len(),
            })
        }
    };

    let gate = match name {
        "id" | "i" => Gate::I,
        "x" => Gate::X,
        "y" => Gate::Y,
        "z" => Gate::Z,
        "h" => Gate::H,
        "s" => Gate::S,
        "sdg" => Gate::Sdg,
        "t" => Gate::T,
        "tdg" => Gate::Tdg,
        "sx" => Gate::SX,
        "sxdg" => Gate::SXdg,
        "rx" => {
            check(1)?;
            Gate::Rx(params[0])
        }
        "ry" => {
            check(1)?;
            Gate::Ry(params[0])
        }
        "rz" => {
            check(1)?;
            Gate::Rz(params[0])
        }
        "p" | "u1" => {
            check(1)?;
            Gate::P(params[0])
        }
        "u2" => {
            check(2)?;
            Gate::U(std::f64::consts::FRAC_PI_2, params[0], params[1])
        }
        "u" | "u3" | "U" => {
            check(3)?;
            Gate::U(params[0], params[1], params[2])
        }
        "cx" | "CX" | "cnot" => Gate::CX,
        "cy" => Gate::CY,
        "cz" => Gate::CZ,
        "swap" => Gate::Swap,
        "crz" => {
            check(1)?;
            Gate::CRz(params[0])
        }
        "cp" | "cu1" => {
            check(1)?;
            Gate::CP(params[0])
        }
        "ccx" | "toffoli" => Gate::CCX,
        _ => return Err(ParseError::UnknownGate(name.to_string())),
    };

    // Parameter-free gates reject stray parameters.
    if gate.params().is_empty() && !params.is_empty() {
        check(0)?;
    }

    Ok(gate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_ir::InstructionKind;

    #[test]
    fn test_parse_qasm2_bell() {
        let source = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            creg c[2];
            h q[0];
            cx q[0], q[1];
            measure q[0] -> c[0];
            measure q[1] -> c[1];
        "#;
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_gates(), 2);
        assert_eq!(circuit.num_ops(), 4);
    }

    #[test]
    fn test_parse_qasm3_measure_assignment() {
        let source = r"
            OPENQASM 3.0;
            qubit[2] q;
            bit[2] c;
            h q[0];
            cx q[0], q[1];
            c = measure q;
        ";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        let measures = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_measure())
            .count();
        assert_eq!(measures, 2);
    }

    #[test]
    fn test_parse_parameterized_gates() {
        let source = r"
            OPENQASM 2.0;
            qreg q[1];
            rz(pi/2) q[0];
            rx(-pi/4) q[0];
            u3(pi, 0, pi) q[0];
        ";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_gates(), 3);

        let rz = circuit.instructions()[0].as_gate().unwrap();
        assert_eq!(rz.params()[0], std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_register_broadcast() {
        let source = r"
            OPENQASM 2.0;
            qreg q[3];
            h q;
        ";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_gates(), 3);
    }

    #[test]
    fn test_two_qubit_broadcast() {
        let source = r"
            OPENQASM 2.0;
            qreg a[2];
            qreg b[2];
            cx a, b;
        ";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_gates(), 2);
        assert_eq!(
            circuit.instructions()[0].qubits,
            vec![QubitId(0), QubitId(2)]
        );
        assert_eq!(
            circuit.instructions()[1].qubits,
            vec![QubitId(1), QubitId(3)]
        );
    }

    #[test]
    fn test_unknown_gate_rejected() {
        let source = r"
            OPENQASM 2.0;
            qreg q[1];
            frobnicate q[0];
        ";
        assert!(matches!(parse(source), Err(ParseError::UnknownGate(_))));
    }

    #[test]
    fn test_undefined_register() {
        let source = r"
            OPENQASM 2.0;
            qreg q[1];
            h r[0];
        ";
        assert!(matches!(
            parse(source),
            Err(ParseError::UndefinedRegister(_))
        ));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let source = r"
            OPENQASM 2.0;
            qreg q[2];
            h q[5];
        ";
        assert!(matches!(
            parse(source),
            Err(ParseError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_legacy_u1() {
        let source = r"
            OPENQASM 2.0;
            qreg q[1];
            u1(0.5) q[0];
        ";
        let circuit = parse(source).unwrap();
        assert!(matches!(
            circuit.instructions()[0].kind,
            InstructionKind::Gate(Gate::P(_))
        ));
    }

    #[test]
    fn test_barrier() {
        let source = r"
            OPENQASM 2.0;
            qreg q[3];
            h q[0];
            barrier q;
            cx q[0], q[1];
        ";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_ops(), 3);
        assert!(circuit.instructions()[1].is_barrier());
        assert_eq!(circuit.instructions()[1].qubits.len(), 3);
    }

    #[test]
    fn test_invalid_version() {
        assert!(matches!(
            parse("OPENQASM 4.0;"),
            Err(ParseError::InvalidVersion(_))
        ));
    }
}
