//! Length-bucketed keyword recognition.
//!
//! A hash map would have to hash a freshly allocated lowercase string on
//! every lookup. Grouping keywords by byte length instead gives a bounded
//! linear scan over a handful of candidates (buckets hold 1-7 entries) with
//! zero allocations and predictable branches.

use std::sync::OnceLock;

use super::Keyword;

/// Length of the longest keyword (`auto_increment`). Identifier spans longer
/// than this are unconditionally identifiers.
pub(crate) const MAX_KEYWORD_LEN: usize = 14;

/// Every keyword, lowercase, in one flat table. The bucketed index is built
/// from this on first use.
const WORDS: &[(&str, Keyword)] = &[
    ("add", Keyword::Add),
    ("after", Keyword::After),
    ("all", Keyword::All),
    ("alter", Keyword::Alter),
    ("analyze", Keyword::Analyze),
    ("and", Keyword::And),
    ("as", Keyword::As),
    ("asc", Keyword::Asc),
    ("auto_increment", Keyword::AutoIncrement),
    ("between", Keyword::Between),
    ("by", Keyword::By),
    ("cascade", Keyword::Cascade),
    ("case", Keyword::Case),
    ("cast", Keyword::Cast),
    ("change", Keyword::Change),
    ("character", Keyword::Character),
    ("check", Keyword::Check),
    ("collate", Keyword::Collate),
    ("column", Keyword::Column),
    ("comment", Keyword::Comment),
    ("constraint", Keyword::Constraint),
    ("create", Keyword::Create),
    ("cross", Keyword::Cross),
    ("database", Keyword::Database),
    ("default", Keyword::Default),
    ("deferrable", Keyword::Deferrable),
    ("deferred", Keyword::Deferred),
    ("delete", Keyword::Delete),
    ("desc", Keyword::Desc),
    ("distinct", Keyword::Distinct),
    ("drop", Keyword::Drop),
    ("else", Keyword::Else),
    ("end", Keyword::End),
    ("engine", Keyword::Engine),
    ("escape", Keyword::Escape),
    ("except", Keyword::Except),
    ("exists", Keyword::Exists),
    ("explain", Keyword::Explain),
    ("false", Keyword::False),
    ("first", Keyword::First),
    ("for", Keyword::For),
    ("foreign", Keyword::Foreign),
    ("from", Keyword::From),
    ("full", Keyword::Full),
    ("function", Keyword::Function),
    ("group", Keyword::Group),
    ("having", Keyword::Having),
    ("if", Keyword::If),
    ("ignore", Keyword::Ignore),
    ("in", Keyword::In),
    ("index", Keyword::Index),
    ("inner", Keyword::Inner),
    ("insert", Keyword::Insert),
    ("intersect", Keyword::Intersect),
    ("into", Keyword::Into),
    ("is", Keyword::Is),
    ("join", Keyword::Join),
    ("key", Keyword::Key),
    ("last", Keyword::Last),
    ("left", Keyword::Left),
    ("like", Keyword::Like),
    ("limit", Keyword::Limit),
    ("match", Keyword::Match),
    ("natural", Keyword::Natural),
    ("no", Keyword::No),
    ("not", Keyword::Not),
    ("null", Keyword::Null),
    ("offset", Keyword::Offset),
    ("on", Keyword::On),
    ("or", Keyword::Or),
    ("order", Keyword::Order),
    ("outer", Keyword::Outer),
    ("partition", Keyword::Partition),
    ("primary", Keyword::Primary),
    ("procedure", Keyword::Procedure),
    ("recursive", Keyword::Recursive),
    ("references", Keyword::References),
    ("rename", Keyword::Rename),
    ("replace", Keyword::Replace),
    ("restrict", Keyword::Restrict),
    ("right", Keyword::Right),
    ("rollback", Keyword::Rollback),
    ("select", Keyword::Select),
    ("set", Keyword::Set),
    ("show", Keyword::Show),
    ("table", Keyword::Table),
    ("tables", Keyword::Tables),
    ("then", Keyword::Then),
    ("to", Keyword::To),
    ("transaction", Keyword::Transaction),
    ("trigger", Keyword::Trigger),
    ("true", Keyword::True),
    ("truncate", Keyword::Truncate),
    ("union", Keyword::Union),
    ("unique", Keyword::Unique),
    ("update", Keyword::Update),
    ("use", Keyword::Use),
    ("using", Keyword::Using),
    ("values", Keyword::Values),
    ("view", Keyword::View),
    ("when", Keyword::When),
    ("where", Keyword::Where),
    ("with", Keyword::With),
    ("without", Keyword::Without),
    // Data types
    ("bigint", Keyword::Bigint),
    ("binary", Keyword::Binary),
    ("blob", Keyword::Blob),
    ("boolean", Keyword::Boolean),
    ("char", Keyword::Char),
    ("date", Keyword::Date),
    ("datetime", Keyword::Datetime),
    ("decimal", Keyword::Decimal),
    ("double", Keyword::Double),
    ("enum", Keyword::Enum),
    ("float", Keyword::Float),
    ("int", Keyword::Int),
    ("integer", Keyword::Integer),
    ("json", Keyword::Json),
    ("jsonb", Keyword::Jsonb),
    ("longblob", Keyword::Longblob),
    ("longtext", Keyword::Longtext),
    ("mediumblob", Keyword::Mediumblob),
    ("mediumint", Keyword::Mediumint),
    ("mediumtext", Keyword::Mediumtext),
    ("nchar", Keyword::Nchar),
    ("numeric", Keyword::Numeric),
    ("real", Keyword::Real),
    ("smallint", Keyword::Smallint),
    ("text", Keyword::Text),
    ("time", Keyword::Time),
    ("timestamp", Keyword::Timestamp),
    ("tinyblob", Keyword::Tinyblob),
    ("tinyint", Keyword::Tinyint),
    ("tinytext", Keyword::Tinytext),
    ("varbinary", Keyword::Varbinary),
    ("varchar", Keyword::Varchar),
    ("year", Keyword::Year),
];

static BUCKETS: OnceLock<[Vec<(&'static str, Keyword)>; MAX_KEYWORD_LEN + 1]> = OnceLock::new();

fn buckets() -> &'static [Vec<(&'static str, Keyword)>; MAX_KEYWORD_LEN + 1] {
    BUCKETS.get_or_init(|| {
        let mut table: [Vec<(&'static str, Keyword)>; MAX_KEYWORD_LEN + 1] = Default::default();
        for &(word, kw) in WORDS {
            table[word.len()].push((word, kw));
        }
        table
    })
}

/// Looks up a lowercase byte slice in the keyword table.
///
/// Returns `None` for anything that is not a keyword, including the empty
/// slice and spans longer than [`MAX_KEYWORD_LEN`]. Never panics.
pub(crate) fn lookup_keyword(lower: &[u8]) -> Option<Keyword> {
    let len = lower.len();
    if len == 0 || len > MAX_KEYWORD_LEN {
        return None;
    }
    buckets()[len]
        .iter()
        .find(|(word, _)| word.as_bytes() == lower)
        .map(|&(_, kw)| kw)
}
