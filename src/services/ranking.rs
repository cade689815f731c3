//! Regional filter and ranking for search results
//!
//! Pure functions over normalized summaries. Editions attributable to
//! Portugal are excluded outright; surviving items are scored by how strongly
//! their signals tie them to the Brazilian market, then stably reordered.
//! The rule tables below replace the regex classification the original
//! handlers used, so the policy is enumerable and testable on its own.

use crate::models::BookSummary;

/// Market a rule attributes an edition to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Brazil,
    Portugal,
}

/// ISBN prefix → region attribution.
/// Brazilian registration groups are 978-85 and 978-65 (85/65 in ISBN-10),
/// Portuguese ones 978-972 and 978-989.
struct IsbnRule {
    prefix: &'static str,
    region: Region,
    weight: i32,
}

const ISBN_RULES: &[IsbnRule] = &[
    IsbnRule { prefix: "97885", region: Region::Brazil, weight: 4 },
    IsbnRule { prefix: "97865", region: Region::Brazil, weight: 4 },
    IsbnRule { prefix: "85", region: Region::Brazil, weight: 4 },
    IsbnRule { prefix: "65", region: Region::Brazil, weight: 4 },
    IsbnRule { prefix: "978972", region: Region::Portugal, weight: 0 },
    IsbnRule { prefix: "978989", region: Region::Portugal, weight: 0 },
    IsbnRule { prefix: "972", region: Region::Portugal, weight: 0 },
    IsbnRule { prefix: "989", region: Region::Portugal, weight: 0 },
];

/// Publisher name fragment → region attribution, matched case-insensitively
/// as a substring. Fragments are stored lowercase.
struct PublisherRule {
    fragment: &'static str,
    region: Region,
    weight: i32,
}

const PUBLISHER_RULES: &[PublisherRule] = &[
    PublisherRule { fragment: "companhia das letras", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "intrínseca", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "sextante", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "record", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "rocco", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "zahar", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "todavia", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "aleph", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "martins fontes", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "l&pm", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "globo livros", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "arqueiro", region: Region::Brazil, weight: 2 },
    PublisherRule { fragment: "porto editora", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "leya", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "bertrand", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "dom quixote", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "caminho", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "presença", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "gradiva", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "almedina", region: Region::Portugal, weight: 0 },
    PublisherRule { fragment: "edições asa", region: Region::Portugal, weight: 0 },
];

/// Sale/availability region that earns the availability bonus
const TARGET_SALE_COUNTRY: &str = "BR";
const SALE_COUNTRY_WEIGHT: i32 = 3;

/// Language prefix every output item must carry
const LANGUAGE_PREFIX: &str = "pt";

fn isbn_rule(isbn: &str) -> Option<&'static IsbnRule> {
    ISBN_RULES.iter().find(|r| isbn.starts_with(r.prefix))
}

fn publisher_rule(publisher: &str) -> Option<&'static PublisherRule> {
    let lower = publisher.to_lowercase();
    PUBLISHER_RULES.iter().find(|r| lower.contains(r.fragment))
}

/// Hard exclusion: any Portugal attribution removes the item regardless of
/// other signals.
fn is_excluded(item: &BookSummary) -> bool {
    let by_isbn = item
        .isbn
        .as_deref()
        .and_then(isbn_rule)
        .map(|r| r.region == Region::Portugal)
        .unwrap_or(false);
    let by_publisher = item
        .publisher
        .as_deref()
        .and_then(publisher_rule)
        .map(|r| r.region == Region::Portugal)
        .unwrap_or(false);
    by_isbn || by_publisher
}

/// Additive regional score for one surviving item
fn regional_score(item: &BookSummary) -> i32 {
    let mut score = 0;
    if let Some(rule) = item.isbn.as_deref().and_then(isbn_rule) {
        if rule.region == Region::Brazil {
            score += rule.weight;
        }
    }
    if item.sale_country.as_deref() == Some(TARGET_SALE_COUNTRY) {
        score += SALE_COUNTRY_WEIGHT;
    }
    if let Some(rule) = item.publisher.as_deref().and_then(publisher_rule) {
        if rule.region == Region::Brazil {
            score += rule.weight;
        }
    }
    score
}

/// Filter out non-Portuguese and Portuguese-market editions, score the rest,
/// and order by score. The sort is stable so upstream relevance order
/// survives ties.
pub fn filter_and_rank(items: Vec<BookSummary>) -> Vec<BookSummary> {
    let mut kept: Vec<BookSummary> = items
        .into_iter()
        // Re-applied locally: the upstream language restriction is advisory
        .filter(|item| item.language.starts_with(LANGUAGE_PREFIX))
        .filter(|item| !is_excluded(item))
        .map(|mut item| {
            item.score = regional_score(&item);
            item
        })
        .collect();
    kept.sort_by_key(|item| std::cmp::Reverse(item.score));
    kept
}
