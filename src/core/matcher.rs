//! Vocabulary tables and the generic matcher that evaluates them
//!
//! Every keyword-driven decision in the core reads from the (pattern,
//! category, weight) tables below. Engines never inline per-keyword
//! branching; they ask the matcher.
//!
//! Patterns are bilingual. English terms sit behind `\b` boundaries;
//! Japanese terms are left bare because `\b` does not fall between
//! adjacent CJK characters.

use lazy_static::lazy_static;
use regex::Regex;

/// One vocabulary row: a compiled pattern, its category, its weight
pub struct VocabEntry {
    pattern: Regex,
    /// Category label reported on a match
    pub category: &'static str,
    /// Contribution per occurrence to the weighted score
    pub weight: f64,
}

impl VocabEntry {
    fn new(pattern: &str, category: &'static str, weight: f64) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            category,
            weight,
        }
    }

    /// Occurrences of this row's pattern in the text
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// Whether this row matches the text at all
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Any row of the table matches
pub fn any_match(table: &[VocabEntry], text: &str) -> bool {
    table.iter().any(|entry| entry.is_match(text))
}

/// Total occurrences across all rows
pub fn match_count(table: &[VocabEntry], text: &str) -> usize {
    table.iter().map(|entry| entry.count(text)).sum()
}

/// Sum of weight x occurrences across all rows
pub fn weighted_score(table: &[VocabEntry], text: &str) -> f64 {
    table
        .iter()
        .map(|entry| entry.weight * entry.count(text) as f64)
        .sum()
}

/// Categories that matched, deduplicated, table order preserved
pub fn matched_categories(table: &[VocabEntry], text: &str) -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for entry in table {
        if entry.is_match(text) && !seen.contains(&entry.category) {
            seen.push(entry.category);
        }
    }
    seen
}

lazy_static! {
    // =========================================================================
    // RISK TIER: high (self-harm, violence, crime, hate, weapons, drugs)
    // =========================================================================
    pub static ref RISK_HIGH: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(suicide|self[- ]harm|kill myself|end my life)\b|自殺|自傷|死にたい|消えたい",
            "self-harm", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(murder|kill (him|her|them)|assault|attack plan)\b|殺す|殺害|暴行|襲撃",
            "violence", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(robbery|fraud|launder(ing)?|how to steal)\b|強盗|詐欺|横領|盗み方",
            "crime", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(hate crime|slur|genocide)\b|ヘイトスピーチ|民族浄化|差別煽動",
            "hate", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(bomb|explosive|firearm|ammunition)\b|爆弾|爆発物|銃|武器製造",
            "weapons", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(meth|cocaine|heroin|fentanyl)\b|覚醒剤|麻薬|大麻",
            "drugs", 1.0,
        ),
    ];

    // =========================================================================
    // RISK TIER: medium (generic danger / violation)
    // =========================================================================
    pub static ref RISK_MEDIUM: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(danger(ous)?|hazard(ous)?|unsafe)\b|危険|危ない",
            "danger", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(illegal|violat(e|ion)|prohibited)\b|違法|違反|禁止",
            "violation", 1.0,
        ),
    ];

    // =========================================================================
    // RISK TIER: low (rumor / unverified claims)
    // =========================================================================
    pub static ref RISK_LOW: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(rumou?r|hearsay|unconfirmed)\b|噂|うわさ|デマ",
            "rumor", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(unverified|allegedly|conspiracy)\b|未確認|陰謀論",
            "unverified", 1.0,
        ),
    ];

    // =========================================================================
    // LIVE TOPICS (category names the primary-source class)
    // =========================================================================
    pub static ref LIVE_TOPICS: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(prime minister|president|chancellor|cabinet)\b|総理|首相|内閣|大統領",
            "officeholder", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(earthquake|seismic|tremor)\b|地震|震度",
            "earthquake", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(nikkei|stock price|market close|exchange rate)\b|日経平均|日経225|株価|為替",
            "market", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(weather|forecast|typhoon)\b|天気|台風|気温",
            "weather", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(breaking news|latest|right now|currently)\b|速報|最新|今の",
            "news", 1.0,
        ),
    ];

    // =========================================================================
    // CORPUS DOMAIN TOPICS
    // =========================================================================
    pub static ref DOMAIN_TOPICS: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(archive|corpus|scripture|classic text|treatise|manuscript)\b|原典|古典|文献|写本",
            "archive", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(doctrine|teaching|principle)\b|教義|原理|教え",
            "doctrine", 1.0,
        ),
        VocabEntry::new(
            r"(?i)\b(citation|source text|reference)\b|引用|根拠|出典|資料",
            "citation", 1.0,
        ),
    ];

    // =========================================================================
    // EVIDENCE LOCATOR SYNTAX (doc=, pdfPage=, P12, page 12, p.12, 12ページ)
    // =========================================================================
    pub static ref LOCATOR_SYNTAX: Vec<VocabEntry> = vec![
        VocabEntry::new(r"(?i)doc\s*=\s*\S+", "doc-key", 1.0),
        VocabEntry::new(r"(?i)pdfPage\s*=\s*\d+", "page-assign", 1.0),
        VocabEntry::new(r"\bP\d{1,4}\b", "page-short", 1.0),
        VocabEntry::new(r"(?i)\bpage\s+\d{1,4}\b", "page-word", 1.0),
        VocabEntry::new(r"(?i)\bp\.\s*\d{1,4}\b", "page-dot", 1.0),
        VocabEntry::new(r"\d{1,4}ページ", "page-ja", 1.0),
    ];

    // =========================================================================
    // TRUTH AXES (weight 0.5 rows need reinforcement to count)
    // =========================================================================
    pub static ref AXIS_FACTUAL: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(when|who|how many|what year|which date)\b|いつ|誰が|何年|何人|日付",
            "factual", 1.0,
        ),
        VocabEntry::new(r"(?i)\b(what|fact)\b|何|事実", "factual", 0.5),
    ];
    pub static ref AXIS_TEXTUAL: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(according to|written|passage|the text says?)\b|書いてある|記載|によると|本文",
            "textual", 1.0,
        ),
    ];
    pub static ref AXIS_CAUSAL: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(why|because|reason|cause)\b|なぜ|何故|理由|原因",
            "causal", 1.0,
        ),
    ];
    pub static ref AXIS_PROCEDURAL: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(how to|steps?|method|procedure)\b|方法|手順|やり方",
            "procedural", 1.0,
        ),
    ];
    pub static ref AXIS_NORMATIVE: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(should|ought|proper|right or wrong)\b|すべき|べきか|正しい|善悪",
            "normative", 1.0,
        ),
    ];
    pub static ref AXIS_SUBJECTIVE: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(feel|feeling|opinion|prefer)\b|思う|感じ|気持ち|意見|好き",
            "subjective", 1.0,
        ),
        VocabEntry::new(r"(?i)\b(think|like)\b", "subjective", 0.5),
    ];

    // =========================================================================
    // HEDGING (independent of risk tier)
    // =========================================================================
    pub static ref HEDGE_SPECULATIVE: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(maybe|perhaps|probably|might|possibly)\b|かも|たぶん|おそらく",
            "speculative", 1.0,
        ),
    ];
    pub static ref HEDGE_ABSOLUTE: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(always|never|definitely|absolutely|certainly|everyone|no one)\b|絶対|必ず|全員|誰も",
            "absolute", 1.0,
        ),
    ];

    // =========================================================================
    // ENERGY: outward (fire) vs inward (water)
    // =========================================================================
    pub static ref ENERGY_FIRE: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(start|launch|push|build|create|expand|act|drive)\b|実行|開始|挑戦|進め|作る|動く|攻め|発信",
            "fire", 1.0,
        ),
    ];
    pub static ref ENERGY_WATER: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(wait|hold|pause|rest|quiet|still|settle|listen)\b|待つ|静か|休む|整理|見直す|落ち着|受け止め",
            "water", 1.0,
        ),
    ];

    // =========================================================================
    // AXIS REFINE TRIGGERS
    // =========================================================================
    pub static ref REFINE_REASONING: Vec<VocabEntry> = vec![
        VocabEntry::new(r"(?i)\b(why|reasoning|reason)\b|なぜ|何故|理由", "reasoning", 1.0),
    ];
    pub static ref REFINE_STRUCTURE: Vec<VocabEntry> = vec![
        VocabEntry::new(r"(?i)\b(how|structure|assemble)\b|構造|構築|組み立て", "structure", 1.0),
    ];
    pub static ref REFINE_OBSERVE: Vec<VocabEntry> = vec![
        VocabEntry::new(r"(?i)\b(observe|look|watch)\b|見る|観察|確認", "observe", 1.0),
    ];
    pub static ref REFINE_EXECUTE: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(execution|decision|do it|go ahead)\b|実行|決定|決行|やろう",
            "execute", 1.0,
        ),
    ];
    pub static ref REFINE_RECONSIDER: Vec<VocabEntry> = vec![
        VocabEntry::new(r"(?i)\b(reconsider|rethink|reflect)\b|再考|考え直す", "reconsider", 1.0),
    ];
    pub static ref REFINE_CONFIRM: Vec<VocabEntry> = vec![
        VocabEntry::new(
            r"(?i)\b(done|finished|complete|result)\b|確認|結果|完了",
            "confirm", 1.0,
        ),
    ];
    pub static ref REFINE_REVIEW: Vec<VocabEntry> = vec![
        VocabEntry::new(r"(?i)\b(review|retrospect|look back)\b|振り返る|反省|評価", "review", 1.0),
    ];
}

// =============================================================================
// TESTS
// =============================================================================
