//! # Script Text Form
//!
//! Parses the whitespace-separated text form produced by
//! [`Script`](crate::Script)'s `Display` impl: `OP_` names, `0x`-prefixed
//! hex push-data, and bare decimal integers (encoded as minimal number
//! pushes).

use logos::Logos;
use num_bigint::BigInt;

use crate::error::OpsError;
use crate::num::encode_num;
use crate::opcode::Opcode;
use crate::script::Script;

/// Tokens of the script text form
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    /// Opcode name
    #[regex(r"OP_[A-Z0-9]+", |lex| lex.slice().to_string())]
    OpName(String),

    /// Hex push-data (may be empty: "0x")
    #[regex(r"0x[0-9a-fA-F]*", |lex| lex.slice()[2..].to_string())]
    Hex(String),

    /// Decimal number, pushed with its minimal encoding
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string())]
    Number(String),
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, OpsError> {
    if hex.len() % 2 != 0 {
        return Err(OpsError::InvalidHex(format!("0x{hex}")));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| OpsError::InvalidHex(format!("0x{hex}")))
        })
        .collect()
}

impl Script {
    /// Parse a script from its text form.
    pub fn parse(text: &str) -> Result<Self, OpsError> {
        let mut out = Script::new();
        for (token, span) in Token::lexer(text).spanned() {
            let token = token.map_err(|()| OpsError::UnknownToken(text[span].to_string()))?;
            match token {
                Token::OpName(name) => {
                    let op =
                        Opcode::from_name(&name).ok_or(OpsError::UnknownOpcode(name))?;
                    out.push_opcode(op);
                }
                Token::Hex(hex) => out.push_slice(&hex_to_bytes(&hex)?),
                Token::Number(digits) => {
                    // The regex guarantees well-formed digits.
                    let n: BigInt = digits.parse().expect("lexed decimal");
                    match i64::try_from(&n).ok().and_then(Opcode::from_small_int) {
                        Some(op) => out.push_opcode(op),
                        None => out.push_slice(&encode_num(&n)),
                    }
                }
            }
        }
        Ok(out)
    }
}
