// src/noyau/jetons.rs

use super::erreur::ErreurCalc;
use super::resolveur::Primitive;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    // Tout nom (fonction ou constante) avant résolution.
    // NOTE: le résolveur décidera (sin/cos/... ou "e"); un nom inconnu est une erreur.
    Ident(String),

    // Fonction résolue (nom + conversion d’angle déjà choisie).
    Appel(Primitive),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 12.5, .5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
///
/// Un identifiant est toujours lu en entier : "exp" ne contient pas la constante e,
/// "asin" ne contient pas sin.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre décimal : chiffres [ . chiffres ] ou . chiffres
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            if !txt.chars().any(|d| d.is_ascii_digit()) {
                return Err(ErreurCalc::syntaxe("point décimal isolé"));
            }
            let v: f64 = txt
                .parse()
                .map_err(|_| ErreurCalc::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalc::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),
            Tok::Appel(p) => p.to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
