//! Localized user-facing text.
//!
//! Every string the interpreter shows to a user is a [`Message`]. The
//! active [`Language`] travels with the session and is passed in when a
//! message is rendered; nothing here is global.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = Message;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "portugues" | "português" => Ok(Language::Pt),
            "en" | "english" => Ok(Language::En),
            _ => Err(Message::UnsupportedLanguage(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Lexer
    InvalidNumber,
    HexNoDigits(String),
    HexInvalidChars(String),
    BinaryNoDigits(String),
    BinaryInvalidChars(String),
    UnknownCharacter(char),
    UnfinishedString(String),
    StringTooLong(usize),

    // Parser
    UnexpectedToken(String),
    UnexpectedEnd,
    ExpectedRightParen,
    ExpectedLeftParenAfterFunction(String),
    ExpectedRightParenAfterArguments(String),
    InvalidExpression,
    IncompleteExpression,
    RequiresExactly { function: String, count: usize },
    RequiresAtLeast { function: String, count: usize },
    UnknownFunction(String),
    NestingTooDeep(usize),
    AssignmentHelp,
    ParenthesesHelp,

    // Evaluator
    UndefinedVariable(String),
    DivisionByZero,
    ModuloByZero,
    ArithmeticRequiresNumbers,
    UnaryRequiresNumbers,
    FactorialDomain,
    MathErrorInOperator(char),
    FunctionWithoutArguments(String),
    NumericArgumentsRequired(String),
    MathErrorInFunction(String),
    DecimalPlacesRange,
    WidthMustBeNumber(String),
    RepeatRequiresText,
    RepeatRequiresCount,

    // Diagnostics
    ErrorPrefix,
    HelpNote,
    LexicalErrorTitle,
    SyntaxErrorTitle,
    NameErrorTitle,
    DomainErrorTitle,
    ResourceErrorTitle,

    // Front end
    Banner { version: String, os: String },
    Instructions,
    Goodbye,
    VariablesHeader,
    NoVariables,
    VariablesTotal(usize),
    LanguageChanged(Language),
    UnsupportedLanguage(String),
    EditorUnavailable(String),
    InputError(String),
    StateReset,
    FileNotFound(String),
    FileReadError { path: String, reason: String },
    LineError { line: usize, message: String },
    CommandsHelp,
    CategoriesHelp,
    ExamplesHelp,
    FunctionHelpHint,
    NoSuchHelpTopic(String),
    OperatorsHeader,
    OperatorsHelp,
    HelpPage { page: usize, total: usize },
    NoSuchHelpPage { page: usize, total: usize },
    PageNavigation,
    AliasOf(String),
    ArityExactly(usize),
    ArityAtLeast(usize),
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl Message {
    pub fn text(&self, language: Language) -> String {
        match language {
            Language::En => self.english(),
            Language::Pt => self.portuguese(),
        }
    }

    fn english(&self) -> String {
        match self {
            Message::InvalidNumber => "Invalid number".to_string(),
            Message::HexNoDigits(s) => {
                format!("Invalid hexadecimal number: 0x{} (no digits after 0x)", s)
            }
            Message::HexInvalidChars(s) => {
                format!("Invalid hexadecimal number: 0x{} (invalid characters)", s)
            }
            Message::BinaryNoDigits(s) => {
                format!("Invalid binary number: 0b{} (no digits after 0b)", s)
            }
            Message::BinaryInvalidChars(s) => {
                format!("Invalid binary number: 0b{} (only 0 and 1 are allowed)", s)
            }
            Message::UnknownCharacter(c) => format!("Unknown character: {}", c),
            Message::UnfinishedString(s) => format!("Unfinished string: \"{}", s),
            Message::StringTooLong(max) => {
                format!("String too long (maximum {} characters)", max)
            }

            Message::UnexpectedToken(t) => format!("Unexpected token '{}'", t),
            Message::UnexpectedEnd => "Unexpected end of input".to_string(),
            Message::ExpectedRightParen => "Expected ')'".to_string(),
            Message::ExpectedLeftParenAfterFunction(f) => {
                format!("Expected '(' after function name '{}'", f)
            }
            Message::ExpectedRightParenAfterArguments(f) => {
                format!("Expected ')' after arguments of '{}'", f)
            }
            Message::InvalidExpression => "Invalid expression".to_string(),
            Message::IncompleteExpression => "Incomplete or invalid expression".to_string(),
            Message::RequiresExactly { function, count } => format!(
                "Function {} requires exactly {} argument{}",
                function,
                count,
                plural(*count)
            ),
            Message::RequiresAtLeast { function, count } => format!(
                "Function {} requires at least {} argument{}",
                function,
                count,
                plural(*count)
            ),
            Message::UnknownFunction(f) => format!("Unknown function: {}", f),
            Message::NestingTooDeep(max) => {
                format!("Expression nested too deeply (limit is {} levels)", max)
            }
            Message::AssignmentHelp => {
                "Assignments take the form name = expression, e.g. x = 10".to_string()
            }
            Message::ParenthesesHelp => {
                "Every opening parenthesis '(' needs a matching ')'".to_string()
            }

            Message::UndefinedVariable(name) => format!("Variable not defined: {}", name),
            Message::DivisionByZero => "Division by zero".to_string(),
            Message::ModuloByZero => "Modulo by zero".to_string(),
            Message::ArithmeticRequiresNumbers => {
                "Arithmetic operations require numbers".to_string()
            }
            Message::UnaryRequiresNumbers => "Unary operations require numbers".to_string(),
            Message::FactorialDomain => {
                "Factorial requires a non-negative integer".to_string()
            }
            Message::MathErrorInOperator(op) => format!("Math error in operator {}", op),
            Message::FunctionWithoutArguments(f) => {
                format!("Function without arguments: {}", f)
            }
            Message::NumericArgumentsRequired(f) => {
                format!("Function {} requires numeric arguments", f)
            }
            Message::MathErrorInFunction(f) => format!("Math error in function {}", f),
            Message::DecimalPlacesRange => {
                "setdec: number of places must be between 0 and 15".to_string()
            }
            Message::WidthMustBeNumber(f) => format!("{}: width must be a number", f),
            Message::RepeatRequiresText => "repeat: first argument must be a string".to_string(),
            Message::RepeatRequiresCount => {
                "repeat: second argument must be a number".to_string()
            }

            Message::ErrorPrefix => "Error".to_string(),
            Message::HelpNote => "help".to_string(),
            Message::LexicalErrorTitle => "Lexical error".to_string(),
            Message::SyntaxErrorTitle => "Syntax error".to_string(),
            Message::NameErrorTitle => "Name error".to_string(),
            Message::DomainErrorTitle => "Math error".to_string(),
            Message::ResourceErrorTitle => "Resource error".to_string(),

            Message::Banner { version, os } => format!("Rudis version {} on {}", version, os),
            Message::Instructions => {
                "Type an expression. To exit type \"exit\" or \"quit\". For help, type \"help\"."
                    .to_string()
            }
            Message::Goodbye => "Goodbye. Thank you for using Rudis. :)".to_string(),
            Message::VariablesHeader => "=== DEFINED VARIABLES ===".to_string(),
            Message::NoVariables => "No variables defined.".to_string(),
            Message::VariablesTotal(n) => format!("Total: {} variable{}", n, plural(*n)),
            Message::LanguageChanged(Language::Pt) => "Language changed to Portuguese".to_string(),
            Message::LanguageChanged(Language::En) => "Language changed to English".to_string(),
            Message::UnsupportedLanguage(code) => {
                format!("Unsupported language '{}'. Use \"set lang pt\" or \"set lang en\".", code)
            }
            Message::EditorUnavailable(reason) => {
                format!("Failed to initialize line editor: {}", reason)
            }
            Message::InputError(reason) => format!("Error reading input: {}", reason),
            Message::StateReset => "State reset. All variables removed.".to_string(),
            Message::FileNotFound(path) => format!("File '{}' not found", path),
            Message::FileReadError { path, reason } => {
                format!("Could not read file '{}': {}", path, reason)
            }
            Message::LineError { line, message } => format!("line {}: {}", line, message),
            Message::CommandsHelp => "Available commands:\n\
                 \x20 exit, quit        Exit Rudis\n\
                 \x20 help              Show this help\n\
                 \x20 help <page>       Show one page of the function reference\n\
                 \x20 help <function>   Describe a built-in function\n\
                 \x20 vars              List defined variables\n\
                 \x20 reset             Remove all variables and restore 6 decimal places\n\
                 \x20 clear             Clear the screen\n\
                 \x20 set lang pt       Mudar para Português\n\
                 \x20 set lang en       Change to English"
                .to_string(),
            Message::CategoriesHelp => "Built-in functions:".to_string(),
            Message::ExamplesHelp => "Examples:\n\
                 \x20 2 + 3 * 4            -> 14\n\
                 \x20 x = 5; x ^ 2         -> 25\n\
                 \x20 5!                   -> 120\n\
                 \x20 sqrt(16) + abs(-2)   -> 6\n\
                 \x20 mean(1, 2, 3, 4)     -> 2.5\n\
                 \x20 pmt(0.01, 12, 1000)  -> -88.85\n\
                 \x20 setdec(2)            two decimal places\n\
                 \x20 print(red(\"hi\"))     coloured output"
                .to_string(),
            Message::FunctionHelpHint => {
                "Type \"help <function>\" for details on a function.".to_string()
            }
            Message::NoSuchHelpTopic(t) => format!("No help available for '{}'", t),
            Message::OperatorsHeader => "Operators".to_string(),
            Message::OperatorsHelp => "\x20 +   addition: a + b\n\
                 \x20 -   subtraction: a - b, negation: -a\n\
                 \x20 *   multiplication: a * b\n\
                 \x20 /   division: a / b\n\
                 \x20 %   modulo: a % b (remainder of the integer parts)\n\
                 \x20 ^   power: a ^ b (groups to the right)\n\
                 \x20 !   factorial: a! (non-negative integers)\n\
                 \x20 =   assignment: name = expression\n\
                 \x20 ;   separates statements on one line"
                .to_string(),
            Message::HelpPage { page, total } => format!("Page {} of {}", page, total),
            Message::NoSuchHelpPage { page, total } => {
                format!("Page {} does not exist. Available pages: 1 to {}", page, total)
            }
            Message::PageNavigation => {
                "Type \"help <number>\" to navigate or \"help <function>\" for details."
                    .to_string()
            }
            Message::AliasOf(f) => format!("alias of {}", f),
            Message::ArityExactly(n) => format!("takes exactly {} argument{}", n, plural(*n)),
            Message::ArityAtLeast(n) => format!("takes at least {} argument{}", n, plural(*n)),
        }
    }

    fn portuguese(&self) -> String {
        match self {
            Message::InvalidNumber => "Número inválido".to_string(),
            Message::HexNoDigits(s) => {
                format!("Número hexadecimal inválido: 0x{} (sem dígitos após 0x)", s)
            }
            Message::HexInvalidChars(s) => {
                format!("Número hexadecimal inválido: 0x{} (caracteres inválidos)", s)
            }
            Message::BinaryNoDigits(s) => {
                format!("Número binário inválido: 0b{} (sem dígitos após 0b)", s)
            }
            Message::BinaryInvalidChars(s) => format!(
                "Número binário inválido: 0b{} (apenas 0 e 1 são permitidos)",
                s
            ),
            Message::UnknownCharacter(c) => format!("Caractere não reconhecido: {}", c),
            Message::UnfinishedString(s) => format!("String não terminada: \"{}", s),
            Message::StringTooLong(max) => {
                format!("String muito longa (máximo {} caracteres)", max)
            }

            Message::UnexpectedToken(t) => format!("Token inesperado '{}'", t),
            Message::UnexpectedEnd => "Fim inesperado da entrada".to_string(),
            Message::ExpectedRightParen => "Esperado ')'".to_string(),
            Message::ExpectedLeftParenAfterFunction(f) => {
                format!("Esperado '(' após o nome da função '{}'", f)
            }
            Message::ExpectedRightParenAfterArguments(f) => {
                format!("Esperado ')' após os argumentos de '{}'", f)
            }
            Message::InvalidExpression => "Expressão inválida".to_string(),
            Message::IncompleteExpression => "Expressão incompleta ou inválida".to_string(),
            Message::RequiresExactly { function, count } => format!(
                "Função {} requer exatamente {} argumento{}",
                function,
                count,
                plural(*count)
            ),
            Message::RequiresAtLeast { function, count } => format!(
                "Função {} requer pelo menos {} argumento{}",
                function,
                count,
                plural(*count)
            ),
            Message::UnknownFunction(f) => format!("Função desconhecida: {}", f),
            Message::NestingTooDeep(max) => {
                format!("Expressão aninhada demais (limite de {} níveis)", max)
            }
            Message::AssignmentHelp => {
                "Atribuições têm a forma nome = expressão, por exemplo x = 10".to_string()
            }
            Message::ParenthesesHelp => "Todo '(' precisa de um ')' correspondente".to_string(),

            Message::UndefinedVariable(name) => format!("Variável não definida: {}", name),
            Message::DivisionByZero => "Divisão por zero".to_string(),
            Message::ModuloByZero => "Módulo por zero".to_string(),
            Message::ArithmeticRequiresNumbers => {
                "Operações aritméticas requerem números".to_string()
            }
            Message::UnaryRequiresNumbers => "Operações unárias requerem números".to_string(),
            Message::FactorialDomain => {
                "Fatorial requer um inteiro não negativo".to_string()
            }
            Message::MathErrorInOperator(op) => format!("Erro matemático no operador {}", op),
            Message::FunctionWithoutArguments(f) => format!("Função sem argumentos: {}", f),
            Message::NumericArgumentsRequired(f) => {
                format!("Função {} requer argumentos numéricos", f)
            }
            Message::MathErrorInFunction(f) => format!("Erro matemático na função {}", f),
            Message::DecimalPlacesRange => {
                "setdec: o número de casas deve estar entre 0 e 15".to_string()
            }
            Message::WidthMustBeNumber(f) => format!("{}: a largura deve ser um número", f),
            Message::RepeatRequiresText => {
                "repeat: o primeiro argumento deve ser uma string".to_string()
            }
            Message::RepeatRequiresCount => {
                "repeat: o segundo argumento deve ser um número".to_string()
            }

            Message::ErrorPrefix => "Erro".to_string(),
            Message::HelpNote => "ajuda".to_string(),
            Message::LexicalErrorTitle => "Erro léxico".to_string(),
            Message::SyntaxErrorTitle => "Erro de sintaxe".to_string(),
            Message::NameErrorTitle => "Erro de nome".to_string(),
            Message::DomainErrorTitle => "Erro matemático".to_string(),
            Message::ResourceErrorTitle => "Erro de recurso".to_string(),

            Message::Banner { version, os } => format!("Rudis versão {} no {}", version, os),
            Message::Instructions => {
                "Digite uma expressão. Para sair digite \"exit\" ou \"quit\". Para ajuda digite \"help\"."
                    .to_string()
            }
            Message::Goodbye => "Até logo. Obrigado por usar Rudis. :)".to_string(),
            Message::VariablesHeader => "=== VARIÁVEIS DEFINIDAS ===".to_string(),
            Message::NoVariables => "Nenhuma variável definida.".to_string(),
            Message::VariablesTotal(n) => {
                let noun = if *n == 1 { "variável" } else { "variáveis" };
                format!("Total: {} {}", n, noun)
            }
            Message::LanguageChanged(Language::Pt) => {
                "Idioma alterado para Português".to_string()
            }
            Message::LanguageChanged(Language::En) => "Idioma alterado para Inglês".to_string(),
            Message::UnsupportedLanguage(code) => {
                format!("Idioma não suportado '{}'. Use \"set lang pt\" ou \"set lang en\".", code)
            }
            Message::EditorUnavailable(reason) => {
                format!("Falha ao iniciar o editor de linha: {}", reason)
            }
            Message::InputError(reason) => format!("Erro ao ler a entrada: {}", reason),
            Message::StateReset => "Estado resetado. Todas as variáveis removidas.".to_string(),
            Message::FileNotFound(path) => format!("Arquivo '{}' não encontrado", path),
            Message::FileReadError { path, reason } => {
                format!("Não foi possível ler o arquivo '{}': {}", path, reason)
            }
            Message::LineError { line, message } => format!("linha {}: {}", line, message),
            Message::CommandsHelp => "Comandos disponíveis:\n\
                 \x20 exit, quit        Sair do Rudis\n\
                 \x20 help              Mostrar esta ajuda\n\
                 \x20 help <página>     Mostrar uma página da referência de funções\n\
                 \x20 help <função>     Descrever uma função embutida\n\
                 \x20 vars              Listar as variáveis definidas\n\
                 \x20 reset             Remover todas as variáveis e voltar a 6 casas decimais\n\
                 \x20 clear             Limpar a tela\n\
                 \x20 set lang pt       Mudar para Português\n\
                 \x20 set lang en       Change to English"
                .to_string(),
            Message::CategoriesHelp => "Funções embutidas:".to_string(),
            Message::ExamplesHelp => "Exemplos:\n\
                 \x20 2 + 3 * 4            -> 14\n\
                 \x20 x = 5; x ^ 2         -> 25\n\
                 \x20 5!                   -> 120\n\
                 \x20 raiz(16) + abs(-2)   -> 6\n\
                 \x20 media(1, 2, 3, 4)    -> 2.5\n\
                 \x20 pagamento(0.01, 12, 1000) -> -88.85\n\
                 \x20 setdec(2)            duas casas decimais\n\
                 \x20 print(red(\"oi\"))     saída colorida"
                .to_string(),
            Message::FunctionHelpHint => {
                "Digite \"help <função>\" para detalhes de uma função.".to_string()
            }
            Message::NoSuchHelpTopic(t) => format!("Nenhuma ajuda disponível para '{}'", t),
            Message::OperatorsHeader => "Operadores".to_string(),
            Message::OperatorsHelp => "\x20 +   adição: a + b\n\
                 \x20 -   subtração: a - b, negação: -a\n\
                 \x20 *   multiplicação: a * b\n\
                 \x20 /   divisão: a / b\n\
                 \x20 %   módulo: a % b (resto das partes inteiras)\n\
                 \x20 ^   potência: a ^ b (agrupa à direita)\n\
                 \x20 !   fatorial: a! (inteiros não negativos)\n\
                 \x20 =   atribuição: nome = expressão\n\
                 \x20 ;   separa comandos na mesma linha"
                .to_string(),
            Message::HelpPage { page, total } => format!("Página {} de {}", page, total),
            Message::NoSuchHelpPage { page, total } => {
                format!("Página {} não existe. Páginas disponíveis: 1 a {}", page, total)
            }
            Message::PageNavigation => {
                "Digite \"help <número>\" para navegar ou \"help <função>\" para detalhes."
                    .to_string()
            }
            Message::AliasOf(f) => format!("sinônimo de {}", f),
            Message::ArityExactly(n) => {
                format!("recebe exatamente {} argumento{}", n, plural(*n))
            }
            Message::ArityAtLeast(n) => {
                format!("recebe pelo menos {} argumento{}", n, plural(*n))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_is_portuguese() {
        assert_eq!(Language::default(), Language::Pt);
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!(" PT ".parse::<Language>(), Ok(Language::Pt));
        assert_eq!(
            "fr".parse::<Language>(),
            Err(Message::UnsupportedLanguage("fr".to_string()))
        );
        assert_eq!(
            Message::UnsupportedLanguage("fr".to_string()).text(Language::Pt),
            "Idioma não suportado 'fr'. Use \"set lang pt\" ou \"set lang en\"."
        );
    }

    #[test]
    fn terminal_failures_are_localized() {
        let editor = Message::EditorUnavailable("no tty".to_string());
        assert_eq!(editor.text(Language::En), "Failed to initialize line editor: no tty");
        assert_eq!(editor.text(Language::Pt), "Falha ao iniciar o editor de linha: no tty");
        assert_eq!(
            Message::InputError("closed".to_string()).text(Language::Pt),
            "Erro ao ler a entrada: closed"
        );
    }

    #[test]
    fn arity_messages_pluralize() {
        let one = Message::RequiresExactly {
            function: "sqrt".to_string(),
            count: 1,
        };
        let two = Message::RequiresAtLeast {
            function: "npv".to_string(),
            count: 2,
        };
        assert_eq!(one.text(Language::En), "Function sqrt requires exactly 1 argument");
        assert_eq!(two.text(Language::Pt), "Função npv requer pelo menos 2 argumentos");
    }
}
