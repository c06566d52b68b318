use std::collections::HashMap;
use std::sync::LazyLock;

/// Contained fragments shorter than this only count on an exact match.
const MIN_CONTAINED_LEN: usize = 3;

type CategoryTable = &'static [(&'static str, &'static [&'static str])];

const SKILL_CATEGORIES: CategoryTable = &[
    (
        "programming_languages",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "golang", "rust",
            "ruby", "php", "kotlin", "swift", "scala", "programming", "coding",
            "software development",
        ],
    ),
    (
        "web_development",
        &[
            "html", "css", "javascript", "typescript", "react", "angular", "vue", "node",
            "express", "django", "flask", "frontend", "front-end", "backend", "back-end",
            "full stack", "fullstack", "web development",
        ],
    ),
    (
        "data",
        &[
            "sql", "mysql", "postgresql", "mongodb", "database", "data analysis",
            "data analytics", "excel", "tableau", "power bi", "statistics", "data science",
            "big data", "etl",
        ],
    ),
    (
        "devops",
        &[
            "docker", "kubernetes", "jenkins", "ci/cd", "terraform", "ansible", "linux",
            "git", "devops", "automation",
        ],
    ),
    (
        "cloud",
        &[
            "aws", "azure", "gcp", "google cloud", "cloud computing", "serverless", "cloud",
        ],
    ),
    (
        "ai_ml",
        &[
            "python", "tensorflow", "pytorch", "machine learning", "deep learning",
            "artificial intelligence", "ai", "ml", "nlp", "computer vision", "scikit-learn",
            "data science", "neural network",
        ],
    ),
    (
        "project_management",
        &[
            "project management", "agile", "scrum", "kanban", "jira", "pmp",
            "stakeholder management", "planning", "leadership",
        ],
    ),
    (
        "marketing",
        &[
            "marketing", "digital marketing", "seo", "sem", "social media",
            "content marketing", "email marketing", "branding", "advertising", "copywriting",
        ],
    ),
    (
        "sales",
        &[
            "sales", "business development", "crm", "salesforce", "negotiation",
            "lead generation", "account management", "customer relationship", "cold calling",
        ],
    ),
    (
        "design",
        &[
            "ui", "ux", "ui/ux", "figma", "sketch", "adobe", "photoshop", "illustrator",
            "graphic design", "web design", "user experience", "user interface", "prototyping",
        ],
    ),
];

const INDUSTRY_CATEGORIES: CategoryTable = &[
    (
        "technology",
        &[
            "technology", "tech", "software", "it", "information technology", "saas",
            "internet", "telecommunications", "computer",
        ],
    ),
    (
        "finance",
        &[
            "finance", "financial services", "fintech", "banking", "bank", "insurance",
            "accounting", "investment",
        ],
    ),
    (
        "healthcare",
        &[
            "healthcare", "health", "medical", "hospital", "pharmaceutical", "pharma",
            "biotech", "clinical", "nursing",
        ],
    ),
    (
        "education",
        &[
            "education", "edtech", "teaching", "school", "university", "training",
            "e-learning", "academic",
        ],
    ),
    (
        "marketing",
        &[
            "marketing", "advertising", "media", "public relations", "pr",
            "digital marketing", "communications",
        ],
    ),
    (
        "engineering",
        &[
            "engineering", "manufacturing", "construction", "mechanical", "electrical",
            "civil", "automotive", "aerospace",
        ],
    ),
    (
        "retail",
        &[
            "retail", "e-commerce", "ecommerce", "consumer goods", "fashion", "wholesale",
            "shopping",
        ],
    ),
    (
        "entertainment",
        &[
            "entertainment", "media", "gaming", "film", "music", "sports", "broadcasting",
            "publishing",
        ],
    ),
];

const WORK_TYPE_CATEGORIES: CategoryTable = &[
    (
        "remote",
        &["remote", "work from home", "wfh", "telecommute", "distributed"],
    ),
    (
        "on-site",
        &["on-site", "onsite", "on site", "in-office", "office", "in person"],
    ),
    ("hybrid", &["hybrid", "flexible", "blended"]),
    (
        "full_time",
        &["full-time", "full time", "fulltime", "permanent"],
    ),
    ("part_time", &["part-time", "part time", "parttime"]),
    (
        "contract",
        &["contract", "freelance", "temporary", "fixed-term"],
    ),
    ("internship", &["internship", "attachment", "graduate programme"]),
];

pub static SKILLS: LazyLock<CategoryIndex> =
    LazyLock::new(|| CategoryIndex::build(SKILL_CATEGORIES));
pub static INDUSTRIES: LazyLock<CategoryIndex> =
    LazyLock::new(|| CategoryIndex::build(INDUSTRY_CATEGORIES));
pub static WORK_TYPES: LazyLock<CategoryIndex> =
    LazyLock::new(|| CategoryIndex::build(WORK_TYPE_CATEGORIES));

/// Inverted index from keyword to the set of categories it belongs to.
///
/// Category membership is substring based: a term belongs to every category
/// holding a keyword it contains or is contained by. For keywords that
/// closure is computed once at build time, so a term that is itself a keyword
/// resolves with one hash lookup. Unknown terms fall back to a keyword scan.
/// Category sets are bitmasks, making the relatedness test a single AND.
#[derive(Debug)]
pub struct CategoryIndex {
    names: Vec<&'static str>,
    keywords: Vec<(&'static str, u64)>,
    closure: HashMap<&'static str, u64>,
}

impl CategoryIndex {
    fn build(table: CategoryTable) -> Self {
        debug_assert!(table.len() <= 64, "category masks are 64 bits wide");

        let names = table.iter().map(|(name, _)| *name).collect();

        let mut direct: HashMap<&'static str, u64> = HashMap::new();
        for (position, (_, keywords)) in table.iter().enumerate() {
            for keyword in *keywords {
                *direct.entry(*keyword).or_insert(0) |= 1 << position;
            }
        }

        let mut keywords: Vec<(&'static str, u64)> = direct.into_iter().collect();
        keywords.sort_by_key(|(keyword, _)| *keyword);

        let closure = keywords
            .iter()
            .map(|(keyword, _)| (*keyword, scan(&keywords, keyword)))
            .collect();

        Self {
            names,
            keywords,
            closure,
        }
    }

    /// Bitmask of every category the term belongs to.
    pub fn categories_of(&self, term: &str) -> u64 {
        let term = normalize_term(term);
        if term.is_empty() {
            return 0;
        }
        match self.closure.get(term.as_str()) {
            Some(mask) => *mask,
            None => scan(&self.keywords, &term),
        }
    }

    /// Category names for a term, in table order.
    pub fn category_names(&self, term: &str) -> Vec<&'static str> {
        let mask = self.categories_of(term);
        self.names
            .iter()
            .enumerate()
            .filter(|(position, _)| mask & (1 << position) != 0)
            .map(|(_, name)| *name)
            .collect()
    }

    /// Two terms are related when they are equal or share a category.
    pub fn related(&self, left: &str, right: &str) -> bool {
        let left_term = normalize_term(left);
        let right_term = normalize_term(right);
        if left_term.is_empty() || right_term.is_empty() {
            return false;
        }
        if left_term == right_term {
            return true;
        }
        self.categories_of(&left_term) & self.categories_of(&right_term) != 0
    }
}

fn scan(keywords: &[(&'static str, u64)], term: &str) -> u64 {
    keywords
        .iter()
        .filter(|(keyword, _)| overlaps(term, keyword))
        .fold(0, |mask, (_, categories)| mask | categories)
}

fn overlaps(term: &str, keyword: &str) -> bool {
    if term == keyword {
        return true;
    }
    (keyword.chars().count() >= MIN_CONTAINED_LEN && term.contains(keyword))
        || (term.chars().count() >= MIN_CONTAINED_LEN && keyword.contains(term))
}

pub(crate) fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

pub fn is_skill_related(left: &str, right: &str) -> bool {
    SKILLS.related(left, right)
}

pub fn is_industry_related(left: &str, right: &str) -> bool {
    INDUSTRIES.related(left, right)
}

pub fn is_work_type_related(left: &str, right: &str) -> bool {
    WORK_TYPES.related(left, right)
}
