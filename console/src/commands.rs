//! Line commands typed at the console prompt.

use std::str::FromStr;

use cadastro_core::CustomerId;
use thiserror::Error;

pub const HELP: &str = "\
Clientes:  nome <texto> | cpf <texto> | nascimento <AAAA-MM-DD> | endereco <texto>
           salvar | editar <id> | excluir <id> | cancelar | buscar [termo] | contatos <id>
Contatos:  tipo <texto> | valor <texto> | obs <texto>
           salvar | editar <id> | excluir <id> | cancelar | voltar
Geral:     listar | ajuda | sair";

/// A form field the user can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Cpf,
    BirthDate,
    Address,
    Kind,
    Value,
    Observation,
}

/// Id of a row in whichever section is visible: a customer or a contact.
pub type RowId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Save,
    Edit(RowId),
    Delete(RowId),
    Cancel,
    Search(String),
    OpenContacts(CustomerId),
    Back,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("comando desconhecido: {0} (digite 'ajuda')")]
    Unknown(String),

    #[error("'{0}' precisa de um id numérico")]
    MissingId(&'static str),
}

fn parse_id<T: FromStr>(arg: &str, command: &'static str) -> Result<T, ParseError> {
    arg.trim().parse().map_err(|_| ParseError::MissingId(command))
}

impl Command {
    /// Parse one input line. Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();
        let command = match word.to_lowercase().as_str() {
            "nome" => Command::Set(Field::Name, arg.to_string()),
            "cpf" => Command::Set(Field::Cpf, arg.to_string()),
            "nascimento" => Command::Set(Field::BirthDate, arg.to_string()),
            "endereco" => Command::Set(Field::Address, arg.to_string()),
            "tipo" => Command::Set(Field::Kind, arg.to_string()),
            "valor" => Command::Set(Field::Value, arg.to_string()),
            "obs" => Command::Set(Field::Observation, arg.to_string()),
            "salvar" => Command::Save,
            "editar" => Command::Edit(parse_id(arg, "editar")?),
            "excluir" => Command::Delete(parse_id(arg, "excluir")?),
            "cancelar" => Command::Cancel,
            "buscar" => Command::Search(arg.to_string()),
            "contatos" => Command::OpenContacts(parse_id(arg, "contatos")?),
            "voltar" => Command::Back,
            "listar" => Command::List,
            "ajuda" | "?" => Command::Help,
            "sair" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn field_keeps_the_rest_of_the_line() {
        assert_eq!(
            Command::parse("endereco  Rua das Flores, 12 "),
            Ok(Some(Command::Set(Field::Address, "Rua das Flores, 12".to_string())))
        );
    }

    #[test]
    fn ids_are_parsed() {
        assert_eq!(Command::parse("editar 7"), Ok(Some(Command::Edit(7))));
        assert_eq!(Command::parse("CONTATOS 3"), Ok(Some(Command::OpenContacts(3))));
        assert_eq!(Command::parse("excluir x"), Err(ParseError::MissingId("excluir")));
        assert_eq!(Command::parse("contatos"), Err(ParseError::MissingId("contatos")));
    }

    #[test]
    fn search_may_be_empty() {
        assert_eq!(Command::parse("buscar"), Ok(Some(Command::Search(String::new()))));
    }

    #[test]
    fn unknown_word_is_rejected() {
        assert!(matches!(Command::parse("apagar 1"), Err(ParseError::Unknown(_))));
    }
}
