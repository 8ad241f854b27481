//! Build constraints: `_GOOS` / `_GOARCH` file name suffixes, `//go:build` expressions and
//! legacy `// +build` lines, evaluated against a target platform the way `go build` does.

use crate::domain::error::LoadError;
use std::env;
use std::path::Path;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Target platform that build constraints are matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub cgo_enabled: bool,
}

impl BuildContext {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            cgo_enabled: true,
        }
    }

    /// The platform this process runs on, in Go's naming.
    pub fn host() -> Self {
        let goos = match env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let little = cfg!(target_endian = "little");
        let goarch = match env::consts::ARCH {
            "x86" => "386",
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "loongarch64" => "loong64",
            "wasm32" => "wasm",
            "mips" if little => "mipsle",
            "mips64" if little => "mips64le",
            "powerpc64" if little => "ppc64le",
            "powerpc64" => "ppc64",
            other => other,
        };
        Self::new(goos, goarch)
    }

    /// Host platform, overridden by `GOOS`, `GOARCH` and `CGO_ENABLED` when set.
    pub fn from_env() -> Self {
        let mut ctx = Self::host();
        if let Some(goos) = non_empty_var("GOOS") {
            ctx.goos = goos;
        }
        if let Some(goarch) = non_empty_var("GOARCH") {
            ctx.goarch = goarch;
        }
        if let Some(cgo) = non_empty_var("CGO_ENABLED") {
            ctx.cgo_enabled = cgo == "1";
        }
        ctx
    }

    /// Whether a single build tag is satisfied. `ignore` and unknown tags never are.
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch || tag == "gc" {
            return true;
        }
        match tag {
            "cgo" => self.cgo_enabled,
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            _ => is_release_tag(tag),
        }
    }

    /// Applies the `*_GOOS`, `*_GOARCH` and `*_GOOS_GOARCH` file name conventions.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        // Everything before the first `_` is ignored, so `linux.go` is not constrained.
        let Some(underscore) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[underscore..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }
        match parts.as_slice() {
            [.., os, arch] if KNOWN_OS.contains(os) && KNOWN_ARCH.contains(arch) => {
                self.matches_tag(os) && self.matches_tag(arch)
            }
            [.., last] if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.matches_tag(last)
            }
            _ => true,
        }
    }

    /// Evaluates the constraint lines in the file header (the comments before `package`).
    ///
    /// A `//go:build` line takes precedence; otherwise every `// +build` line in the comment
    /// block that ends with a blank line must be satisfied.
    pub fn matches_header(&self, path: &Path, content: &[u8]) -> Result<bool, LoadError> {
        let header = FileHeader::scan(content);
        if let Some(expr) = header.go_build {
            return Expr::parse(&expr)
                .map(|e| e.eval(self))
                .map_err(|message| LoadError::BuildConstraint {
                    path: path.to_path_buf(),
                    message,
                });
        }
        Ok(header
            .plus_build
            .iter()
            .all(|line| self.matches_plus_build(line)))
    }

    /// `// +build a,b c` means `(a && b) || c`.
    fn matches_plus_build(&self, line: &str) -> bool {
        line.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !self.matches_tag(tag),
                None => self.matches_tag(term),
            })
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// `go1.N` release tags are treated as satisfied.
fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()))
}

/// Constraint lines collected from a file header.
#[derive(Debug, Default, PartialEq, Eq)]
struct FileHeader {
    go_build: Option<String>,
    plus_build: Vec<String>,
}

impl FileHeader {
    fn scan(content: &[u8]) -> Self {
        let text = String::from_utf8_lossy(content);
        let mut go_build = None;
        // `// +build` lines seen so far, and how many of them precede the last blank line.
        let mut plus_build = Vec::new();
        let mut confirmed = 0;
        let mut in_block_comment = false;

        for line in text.lines() {
            let line = line.trim();
            if in_block_comment {
                if line.contains("*/") {
                    in_block_comment = false;
                }
                continue;
            }
            if line.is_empty() {
                confirmed = plus_build.len();
            } else if let Some(comment) = line.strip_prefix("//") {
                if let Some(expr) = comment.strip_prefix("go:build")
                    && (expr.is_empty() || expr.starts_with(char::is_whitespace))
                {
                    if go_build.is_none() {
                        go_build = Some(expr.trim().to_string());
                    }
                } else if let Some(tags) = comment.trim_start().strip_prefix("+build")
                    && (tags.is_empty() || tags.starts_with(char::is_whitespace))
                {
                    plus_build.push(tags.trim().to_string());
                }
            } else if line.starts_with("/*") {
                in_block_comment = !line.contains("*/");
            } else {
                break;
            }
        }

        plus_build.truncate(confirmed);
        Self {
            go_build,
            plus_build,
        }
    }
}

/// Parsed `//go:build` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn parse(input: &str) -> Result<Self, String> {
        let tokens = tokenize(input)?;
        let mut parser = ExprParser { tokens, pos: 0 };
        let expr = parser.or()?;
        match parser.tokens.get(parser.pos) {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected {token:?} in //go:build {input}")),
        }
    }

    fn eval(&self, ctx: &BuildContext) -> bool {
        match self {
            Self::Tag(tag) => ctx.matches_tag(tag),
            Self::Not(inner) => !inner.eval(ctx),
            Self::And(a, b) => a.eval(ctx) && b.eval(ctx),
            Self::Or(a, b) => a.eval(ctx) || b.eval(ctx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '!' => tokens.push(Token::Not),
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            '&' | '|' => {
                if chars.next_if(|&(_, next)| next == c).is_none() {
                    return Err(format!("invalid operator at offset {i} in //go:build {input}"));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut tag = String::from(c);
                while let Some((_, next)) =
                    chars.next_if(|&(_, n)| n.is_alphanumeric() || n == '_' || n == '.')
                {
                    tag.push(next);
                }
                tokens.push(Token::Tag(tag));
            }
            other => return Err(format!("invalid character {other:?} in //go:build {input}")),
        }
    }
    Ok(tokens)
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<Expr, String> {
        let mut expr = self.and()?;
        while self.eat(&Token::Or) {
            expr = Expr::Or(Box::new(expr), Box::new(self.and()?));
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, String> {
        let mut expr = self.unary()?;
        while self.eat(&Token::And) {
            expr = Expr::And(Box::new(expr), Box::new(self.unary()?));
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, String> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        if self.eat(&Token::Open) {
            let expr = self.or()?;
            if !self.eat(&Token::Close) {
                return Err("missing )".to_string());
            }
            return Ok(expr);
        }
        match self.tokens.get(self.pos).cloned() {
            Some(Token::Tag(tag)) => {
                self.pos += 1;
                Ok(Expr::Tag(tag))
            }
            Some(other) => Err(format!("unexpected {other:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}
