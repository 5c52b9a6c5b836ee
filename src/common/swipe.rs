// src/common/swipe.rs

use regex::Regex;
use std::sync::LazyLock;

// Matrículas digitadas à mão começam com este prefixo institucional.
const ID_PREFIX: &str = "100";

// Trilha 2/3 do leitor magnético: ";1002151686?"
static TRACK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";(\d{6,})\?").expect("regex da trilha de matrícula"));

// Resultado do parse de uma leitura crua do quiosque.
// A trilha 1 (só nome, sem matrícula) não identifica ninguém sozinha,
// então cai em Unrecognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeInput {
    Email(String),
    InstitutionalId(String),
    Unrecognized,
}

pub fn parse_swipe(raw: &str) -> SwipeInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return SwipeInput::Unrecognized;
    }

    // Entrada manual por e-mail
    if trimmed.contains('@') {
        return SwipeInput::Email(trimmed.to_string());
    }

    // Entrada manual por matrícula
    if trimmed.starts_with(ID_PREFIX) && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return SwipeInput::InstitutionalId(trimmed.to_string());
    }

    // Leitura de cartão
    if let Some(caps) = TRACK_ID.captures(trimmed) {
        return SwipeInput::InstitutionalId(caps[1].to_string());
    }

    SwipeInput::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_id_number() {
        assert_eq!(
            parse_swipe("1002151686"),
            SwipeInput::InstitutionalId("1002151686".into())
        );
        // Espaços do leitor não atrapalham
        assert_eq!(
            parse_swipe("  1002151686 "),
            SwipeInput::InstitutionalId("1002151686".into())
        );
    }

    #[test]
    fn full_card_swipe() {
        let raw = "%B6391500926068134^NGUYEN/TRUONG B ^;1002151686?";
        assert_eq!(
            parse_swipe(raw),
            SwipeInput::InstitutionalId("1002151686".into())
        );
    }

    #[test]
    fn track_two_alone() {
        assert_eq!(
            parse_swipe(";1002151686?"),
            SwipeInput::InstitutionalId("1002151686".into())
        );
    }

    #[test]
    fn manual_email() {
        assert_eq!(
            parse_swipe("maria@mavs.uta.edu"),
            SwipeInput::Email("maria@mavs.uta.edu".into())
        );
    }

    #[test]
    fn track_one_alone_is_unrecognized() {
        // Só o nome, sem trilha de matrícula
        assert_eq!(
            parse_swipe("%B6391500926068134^NGUYEN/TRUONG B ^"),
            SwipeInput::Unrecognized
        );
    }

    #[test]
    fn garbage_and_empty() {
        assert_eq!(parse_swipe(""), SwipeInput::Unrecognized);
        assert_eq!(parse_swipe("   "), SwipeInput::Unrecognized);
        assert_eq!(parse_swipe("abc123"), SwipeInput::Unrecognized);
        // A trilha exige pelo menos 6 dígitos
        assert_eq!(parse_swipe(";12345?"), SwipeInput::Unrecognized);
        // Número sem o prefixo institucional e sem formato de trilha
        assert_eq!(parse_swipe("999888777"), SwipeInput::Unrecognized);
    }
}
