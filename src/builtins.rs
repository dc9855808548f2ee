//! The built-in function registry.
//!
//! A static table drives both sides of a call: the lexer asks
//! [`is_function`] to classify names, the parser checks [`Arity`] after
//! reading the argument list, and the evaluator hands evaluated arguments
//! to [`call`].

use log::debug;

use crate::console::Console;
use crate::lang::{Language, Message};
use crate::math;
use crate::style::{self, Alignment};
use crate::value::Value;

use Arity::{AtLeast, Exact};

pub const MAX_DECIMAL_PLACES: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    pub fn check(self, function: &str, count: usize) -> Result<(), Message> {
        if self.accepts(count) {
            return Ok(());
        }
        let function = function.to_string();
        Err(match self {
            Arity::Exact(count) => Message::RequiresExactly { function, count },
            Arity::AtLeast(count) => Message::RequiresAtLeast { function, count },
        })
    }

    pub fn describe(self) -> Message {
        match self {
            Arity::Exact(n) => Message::ArityExactly(n),
            Arity::AtLeast(n) => Message::ArityAtLeast(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Math,
    Statistics,
    Finance,
    Settings,
    Console,
    Style,
    Layout,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Math,
        Category::Statistics,
        Category::Finance,
        Category::Settings,
        Category::Console,
        Category::Style,
        Category::Layout,
    ];

    pub fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Category::Math, Language::En) => "Math",
            (Category::Math, Language::Pt) => "Matemática",
            (Category::Statistics, Language::En) => "Statistics",
            (Category::Statistics, Language::Pt) => "Estatística",
            (Category::Finance, Language::En) => "Finance",
            (Category::Finance, Language::Pt) => "Finanças",
            (Category::Settings, Language::En) => "Settings",
            (Category::Settings, Language::Pt) => "Configuração",
            (Category::Console, Language::En) => "Console",
            (Category::Console, Language::Pt) => "Console",
            (Category::Style, Language::En) => "Text style",
            (Category::Style, Language::Pt) => "Estilo de texto",
            (Category::Layout, Language::En) => "Layout",
            (Category::Layout, Language::Pt) => "Alinhamento",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub name: &'static str,
    /// Canonical name when `name` is a Portuguese alias.
    pub alias_of: Option<&'static str>,
    pub arity: Arity,
    pub category: Category,
    summary_en: &'static str,
    summary_pt: &'static str,
}

impl Builtin {
    pub fn canonical(&self) -> &'static str {
        self.alias_of.unwrap_or(self.name)
    }

    pub fn summary(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.summary_en,
            Language::Pt => self.summary_pt,
        }
    }
}

const fn builtin(
    name: &'static str,
    arity: Arity,
    category: Category,
    summary_en: &'static str,
    summary_pt: &'static str,
) -> Builtin {
    Builtin {
        name,
        alias_of: None,
        arity,
        category,
        summary_en,
        summary_pt,
    }
}

pub const FUNCTIONS: &[Builtin] = &[
    builtin("sqrt", Exact(1), Category::Math, "square root", "raiz quadrada"),
    builtin("sin", Exact(1), Category::Math, "sine (radians)", "seno (radianos)"),
    builtin("cos", Exact(1), Category::Math, "cosine (radians)", "cosseno (radianos)"),
    builtin("tan", Exact(1), Category::Math, "tangent (radians)", "tangente (radianos)"),
    builtin("log", Exact(1), Category::Math, "base-10 logarithm", "logaritmo na base 10"),
    builtin("ln", Exact(1), Category::Math, "natural logarithm", "logaritmo natural"),
    builtin("exp", Exact(1), Category::Math, "e raised to x", "e elevado a x"),
    builtin("abs", Exact(1), Category::Math, "absolute value", "valor absoluto"),
    builtin("mean", AtLeast(1), Category::Statistics, "arithmetic mean", "média aritmética"),
    builtin("median", AtLeast(1), Category::Statistics, "median", "mediana"),
    builtin("std", AtLeast(1), Category::Statistics, "sample standard deviation", "desvio padrão amostral"),
    builtin("variance", AtLeast(1), Category::Statistics, "sample variance", "variância amostral"),
    builtin("mode", AtLeast(1), Category::Statistics, "most frequent value", "valor mais frequente"),
    builtin("sum", AtLeast(1), Category::Statistics, "sum of the values", "soma dos valores"),
    builtin("min", AtLeast(1), Category::Statistics, "smallest value", "menor valor"),
    builtin("max", AtLeast(1), Category::Statistics, "largest value", "maior valor"),
    builtin("pv", Exact(3), Category::Finance, "present value: pv(rate, nper, pmt)", "valor presente: vp(taxa, periodos, pagamento)"),
    builtin("fv", Exact(3), Category::Finance, "future value: fv(rate, nper, pmt)", "valor futuro: vf(taxa, periodos, pagamento)"),
    builtin("pmt", Exact(3), Category::Finance, "payment: pmt(rate, nper, pv)", "pagamento: pagamento(taxa, periodos, vp)"),
    builtin("nper", Exact(3), Category::Finance, "number of periods: nper(rate, pmt, pv)", "número de períodos: periodos(taxa, pagamento, vp)"),
    builtin("rate", Exact(4), Category::Finance, "rate per period: rate(nper, pmt, pv, fv), fixed 5% estimate", "taxa por período: taxa(periodos, pagamento, vp, vf), estimativa fixa de 5%"),
    builtin("npv", AtLeast(2), Category::Finance, "net present value: npv(rate, cf0, cf1, ...)", "valor presente líquido: vpl(taxa, fc0, fc1, ...)"),
    builtin("irr", AtLeast(2), Category::Finance, "internal rate of return: irr(cf0, cf1, ...)", "taxa interna de retorno: tir(fc0, fc1, ...)"),
    builtin("si", Exact(3), Category::Finance, "simple interest: si(principal, rate, time)", "juros simples: js(capital, taxa, tempo)"),
    builtin("fv_si", Exact(3), Category::Finance, "simple-interest amount: fv_si(principal, rate, time)", "montante com juros simples: montante_js(capital, taxa, tempo)"),
    builtin("ci", Exact(3), Category::Finance, "compound interest: ci(principal, rate, time)", "juros compostos: jc(capital, taxa, tempo)"),
    builtin("fv_ci", Exact(3), Category::Finance, "compound-interest amount: fv_ci(principal, rate, time)", "montante com juros compostos: montante_jc(capital, taxa, tempo)"),
    builtin("setdec", Exact(1), Category::Settings, "set displayed decimal places (0 to 15)", "define as casas decimais exibidas (0 a 15)"),
    builtin("print", AtLeast(0), Category::Console, "print values separated by spaces", "imprime valores separados por espaços"),
    builtin("clear", Exact(0), Category::Console, "clear the screen", "limpa a tela"),
    builtin("left", Exact(2), Category::Layout, "left(width, text): pad on the right", "left(largura, texto): completa à direita"),
    builtin("center", Exact(2), Category::Layout, "center(width, text): pad on both sides", "center(largura, texto): centraliza"),
    builtin("right", Exact(2), Category::Layout, "right(width, text): pad on the left", "right(largura, texto): completa à esquerda"),
    builtin("repeat", Exact(2), Category::Layout, "repeat(text, count): repeat the first character", "repeat(texto, vezes): repete o primeiro caractere"),
];

/// Portuguese names and the function each one stands for.
pub const ALIASES: &[(&str, &str)] = &[
    ("raiz", "sqrt"),
    ("sen", "sin"),
    ("log10", "log"),
    ("media", "mean"),
    ("mediana", "median"),
    ("desvio", "std"),
    ("variancia", "variance"),
    ("moda", "mode"),
    ("soma", "sum"),
    ("minimo", "min"),
    ("maximo", "max"),
    ("vp", "pv"),
    ("vf", "fv"),
    ("pagamento", "pmt"),
    ("periodos", "nper"),
    ("taxa", "rate"),
    ("vpl", "npv"),
    ("tir", "irr"),
    ("js", "si"),
    ("montante_js", "fv_si"),
    ("jc", "ci"),
    ("montante_jc", "fv_ci"),
];

pub fn lookup(name: &str) -> Option<Builtin> {
    if let Some(found) = FUNCTIONS.iter().find(|f| f.name == name) {
        return Some(*found);
    }
    if let Some((alias, target)) = ALIASES.iter().find(|(alias, _)| *alias == name) {
        return FUNCTIONS
            .iter()
            .find(|f| f.name == *target)
            .map(|f| Builtin {
                name: *alias,
                alias_of: Some(f.name),
                ..*f
            });
    }
    style::find(name).map(|s| {
        builtin(
            s.name,
            Exact(1),
            Category::Style,
            "ANSI text style",
            "estilo de texto ANSI",
        )
    })
}

pub fn is_function(name: &str) -> bool {
    lookup(name).is_some()
}

/// Every registered name, in table order.
pub fn all() -> impl Iterator<Item = Builtin> {
    FUNCTIONS
        .iter()
        .copied()
        .chain(ALIASES.iter().filter_map(|(alias, _)| lookup(alias)))
        .chain(style::STYLES.iter().filter_map(|s| lookup(s.name)))
}

/// Session state a builtin may touch.
pub struct CallContext<'a> {
    pub decimal_places: &'a mut usize,
    pub console: &'a mut dyn Console,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Returned {
    Value(Value),
    /// Ran for its effect; nothing to display.
    Silent,
}

pub fn call(name: &str, args: &[Value], ctx: &mut CallContext<'_>) -> Result<Returned, Message> {
    let builtin = lookup(name).ok_or_else(|| Message::UnknownFunction(name.to_string()))?;
    builtin.arity.check(name, args.len())?;
    let canonical = builtin.canonical();
    debug!("calling {} with {} argument(s)", canonical, args.len());

    match builtin.category {
        Category::Console => return Ok(console(canonical, args, ctx)),
        Category::Layout => return layout(canonical, args).map(Returned::Value),
        Category::Style => {
            let style = style::find(canonical)
                .ok_or_else(|| Message::UnknownFunction(name.to_string()))?;
            let text = args[0].coerce_to_string(None);
            return Ok(Returned::Value(Value::string(style.apply(&text))));
        }
        _ => {}
    }

    let numbers = numeric_args(name, args)?;
    if canonical == "setdec" {
        let places = numbers[0].trunc();
        if !(0.0..=MAX_DECIMAL_PLACES as f64).contains(&places) {
            return Err(Message::DecimalPlacesRange);
        }
        *ctx.decimal_places = places as usize;
        debug!("decimal places set to {}", places);
        return Ok(Returned::Silent);
    }

    numeric(canonical, &numbers)
        .map(|n| Returned::Value(Value::Number(n)))
        .ok_or_else(|| Message::UnknownFunction(name.to_string()))
}

fn numeric_args(name: &str, args: &[Value]) -> Result<Vec<f64>, Message> {
    args.iter()
        .map(|arg| {
            arg.as_number()
                .ok_or_else(|| Message::NumericArgumentsRequired(name.to_string()))
        })
        .collect()
}

/// Numeric builtins by canonical name. Results may be `NaN`.
fn numeric(name: &str, x: &[f64]) -> Option<f64> {
    let result = match name {
        "sqrt" => math::sqrt(x[0]),
        "sin" => x[0].sin(),
        "cos" => x[0].cos(),
        "tan" => x[0].tan(),
        "log" => math::log10(x[0]),
        "ln" => math::ln(x[0]),
        "exp" => x[0].exp(),
        "abs" => x[0].abs(),

        "mean" => math::mean(x),
        "median" => math::median(x),
        "std" => math::std_dev(x),
        "variance" => math::variance(x),
        "mode" => math::mode(x),
        "sum" => math::sum(x),
        "min" => math::min(x),
        "max" => math::max(x),

        "pv" => math::pv(x[0], x[1], x[2]),
        "fv" => math::fv(x[0], x[1], x[2]),
        "pmt" => math::pmt(x[0], x[1], x[2]),
        "nper" => math::nper(x[0], x[1], x[2]),
        "rate" => math::rate(x[0], x[1], x[2], x[3]),
        "npv" => math::npv(x[0], &x[1..]),
        "irr" => math::irr(x),
        "si" => math::simple_interest(x[0], x[1], x[2]),
        "fv_si" => math::simple_amount(x[0], x[1], x[2]),
        "ci" => math::compound_interest(x[0], x[1], x[2]),
        "fv_ci" => math::compound_amount(x[0], x[1], x[2]),
        _ => return None,
    };
    Some(result)
}

fn console(name: &str, args: &[Value], ctx: &mut CallContext<'_>) -> Returned {
    if name == "clear" {
        ctx.console.clear_screen();
    } else {
        let line = args
            .iter()
            .map(|arg| arg.render(*ctx.decimal_places))
            .collect::<Vec<_>>()
            .join(" ");
        ctx.console.write_line(&line);
    }
    Returned::Silent
}

fn layout(name: &str, args: &[Value]) -> Result<Value, Message> {
    if let Some(alignment) = Alignment::from_name(name) {
        let width = args[0]
            .as_number()
            .ok_or_else(|| Message::WidthMustBeNumber(name.to_string()))?;
        let text = args[1].coerce_to_string(None);
        return Ok(Value::string(style::align(
            alignment,
            style::clamp_width(width),
            &text,
        )));
    }

    let text = match &args[0] {
        Value::String(s) => s,
        _ => return Err(Message::RepeatRequiresText),
    };
    let count = args[1].as_number().ok_or(Message::RepeatRequiresCount)?;
    Ok(Value::string(style::repeat(text, style::clamp_width(count))))
}
