//! Skills dictionary, alias table and stop words.
//!
//! Built once per process behind a `OnceLock` and shared read-only by every request.
//! Keys are normalized (lower-case, space-joined tokens) so the normalizer can look up
//! single tokens and multi-word phrases the same way. Phrase lookup over a token
//! stream goes through an anchored leftmost-longest Aho-Corasick automaton.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::OnceLock;

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};

/// Broad family a dictionary term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Language,
    Framework,
    Data,
    Cloud,
    Tooling,
    Practice,
    Methodology,
    Certification,
    Interpersonal,
}

/// A canonical dictionary entry.
#[derive(Debug, Clone)]
pub struct SkillTerm {
    pub display: &'static str,
    pub category: SkillCategory,
}

use SkillCategory::*;

/// (canonical key, display form, category)
const SKILLS: &[(&str, &str, SkillCategory)] = &[
    // Languages
    ("java", "Java", Language),
    ("python", "Python", Language),
    ("javascript", "JavaScript", Language),
    ("typescript", "TypeScript", Language),
    ("golang", "Golang", Language),
    ("rust", "Rust", Language),
    ("c++", "C++", Language),
    ("c#", "C#", Language),
    ("kotlin", "Kotlin", Language),
    ("scala", "Scala", Language),
    ("swift", "Swift", Language),
    ("ruby", "Ruby", Language),
    ("php", "PHP", Language),
    ("sql", "SQL", Language),
    ("html", "HTML", Language),
    ("css", "CSS", Language),
    ("bash", "Bash", Language),
    // Frameworks and runtimes
    ("spring boot", "Spring Boot", Framework),
    ("spring", "Spring", Framework),
    ("hibernate", "Hibernate", Framework),
    ("react", "React", Framework),
    ("react native", "React Native", Framework),
    ("angular", "Angular", Framework),
    ("vue", "Vue", Framework),
    ("next.js", "Next.js", Framework),
    ("node.js", "Node.js", Framework),
    ("express.js", "Express.js", Framework),
    ("django", "Django", Framework),
    ("flask", "Flask", Framework),
    ("fastapi", "FastAPI", Framework),
    (".net", ".NET", Framework),
    ("rails", "Rails", Framework),
    ("graphql", "GraphQL", Framework),
    ("grpc", "gRPC", Framework),
    ("rest api", "REST API", Framework),
    ("tensorflow", "TensorFlow", Framework),
    ("pytorch", "PyTorch", Framework),
    ("pandas", "pandas", Framework),
    ("numpy", "NumPy", Framework),
    ("scikit-learn", "scikit-learn", Framework),
    // Data stores and pipelines
    ("mysql", "MySQL", Data),
    ("postgresql", "PostgreSQL", Data),
    ("mongodb", "MongoDB", Data),
    ("redis", "Redis", Data),
    ("elasticsearch", "Elasticsearch", Data),
    ("dynamodb", "DynamoDB", Data),
    ("cassandra", "Cassandra", Data),
    ("oracle", "Oracle", Data),
    ("kafka", "Kafka", Data),
    ("rabbitmq", "RabbitMQ", Data),
    ("spark", "Spark", Data),
    ("hadoop", "Hadoop", Data),
    ("airflow", "Airflow", Data),
    ("snowflake", "Snowflake", Data),
    ("tableau", "Tableau", Data),
    ("power bi", "Power BI", Data),
    // Cloud and infrastructure
    ("aws", "AWS", Cloud),
    ("azure", "Azure", Cloud),
    ("gcp", "GCP", Cloud),
    ("docker", "Docker", Cloud),
    ("kubernetes", "Kubernetes", Cloud),
    ("helm", "Helm", Cloud),
    ("terraform", "Terraform", Cloud),
    ("ansible", "Ansible", Cloud),
    ("linux", "Linux", Cloud),
    ("serverless", "Serverless", Cloud),
    // Tooling
    ("git", "Git", Tooling),
    ("github actions", "GitHub Actions", Tooling),
    ("jenkins", "Jenkins", Tooling),
    ("ci/cd", "CI/CD", Tooling),
    ("jira", "Jira", Tooling),
    ("maven", "Maven", Tooling),
    ("gradle", "Gradle", Tooling),
    ("webpack", "webpack", Tooling),
    ("prometheus", "Prometheus", Tooling),
    ("grafana", "Grafana", Tooling),
    // Practices and domains
    ("microservices", "Microservices", Practice),
    ("distributed systems", "Distributed Systems", Practice),
    ("system design", "System Design", Practice),
    ("data structures", "Data Structures", Practice),
    ("algorithms", "Algorithms", Practice),
    ("machine learning", "Machine Learning", Practice),
    ("deep learning", "Deep Learning", Practice),
    ("artificial intelligence", "Artificial Intelligence", Practice),
    ("natural language processing", "Natural Language Processing", Practice),
    ("computer vision", "Computer Vision", Practice),
    ("data science", "Data Science", Practice),
    ("data analysis", "Data Analysis", Practice),
    ("devops", "DevOps", Practice),
    ("site reliability engineering", "Site Reliability Engineering", Practice),
    ("unit testing", "Unit Testing", Practice),
    ("security", "Security", Practice),
    // Methodologies
    ("agile", "Agile", Methodology),
    ("scrum", "Scrum", Methodology),
    ("kanban", "Kanban", Methodology),
    ("tdd", "TDD", Methodology),
    ("project management", "Project Management", Methodology),
    ("product management", "Product Management", Methodology),
    // Certifications
    ("pmp", "PMP", Certification),
    ("csm", "CSM", Certification),
    ("cissp", "CISSP", Certification),
    ("ccna", "CCNA", Certification),
    ("cka", "CKA", Certification),
    ("ckad", "CKAD", Certification),
    ("security+", "Security+", Certification),
    (
        "aws certified solutions architect",
        "AWS Certified Solutions Architect",
        Certification,
    ),
    // Interpersonal
    ("leadership", "Leadership", Interpersonal),
    ("communication", "Communication", Interpersonal),
    ("teamwork", "Teamwork", Interpersonal),
    ("problem solving", "Problem Solving", Interpersonal),
    ("mentoring", "Mentoring", Interpersonal),
    ("stakeholder management", "Stakeholder Management", Interpersonal),
];

/// (alias, canonical key). Canonical keys must exist in `SKILLS`.
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("go lang", "golang"),
    ("cpp", "c++"),
    ("csharp", "c#"),
    ("dotnet", ".net"),
    ("asp.net", ".net"),
    ("springboot", "spring boot"),
    ("spring-boot", "spring boot"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("react-native", "react native"),
    ("angularjs", "angular"),
    ("vuejs", "vue"),
    ("vue.js", "vue"),
    ("nextjs", "next.js"),
    ("nodejs", "node.js"),
    ("node", "node.js"),
    ("expressjs", "express.js"),
    ("ruby on rails", "rails"),
    ("restful", "rest api"),
    ("restful api", "rest api"),
    ("restful apis", "rest api"),
    ("rest apis", "rest api"),
    ("sklearn", "scikit-learn"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("elastic search", "elasticsearch"),
    ("apache kafka", "kafka"),
    ("apache spark", "spark"),
    ("powerbi", "power bi"),
    ("amazon web services", "aws"),
    ("microsoft azure", "azure"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("k8s", "kubernetes"),
    ("github", "git"),
    ("cicd", "ci/cd"),
    ("ci-cd", "ci/cd"),
    ("continuous integration", "ci/cd"),
    ("micro-services", "microservices"),
    ("micro services", "microservices"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("nlp", "natural language processing"),
    ("dev ops", "devops"),
    ("sre", "site reliability engineering"),
    ("test-driven development", "tdd"),
    ("test driven development", "tdd"),
    ("certified scrummaster", "csm"),
    ("certified scrum master", "csm"),
    ("problem-solving", "problem solving"),
    ("team work", "teamwork"),
];

/// Common English words and job-posting boilerplate never kept as candidate keywords.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all", "also", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "etc", "every", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "me", "more", "most", "must", "my", "no", "nor", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "per", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "within", "without", "would", "you",
    "your", "yours", "e.g", "i.e",
    // job-posting boilerplate
    "ability", "able", "apply", "based", "benefits", "bonus", "build", "building",
    "candidate", "candidates", "collaborate", "company", "cross-functional", "day", "days",
    "deliver", "design", "designing", "develop", "developer", "developers", "development",
    "employer", "engineer", "engineering", "engineers", "ensure", "environment",
    "environments", "equal", "excellent", "experience", "experienced", "familiar",
    "familiarity", "full-time", "good", "great", "hands-on", "help", "hybrid", "ideal",
    "implement", "including", "job", "join", "junior", "knowledge", "lead", "level",
    "looking", "maintain", "mid", "month", "months", "new", "nice", "office", "opportunity",
    "part-time", "plus", "position", "preferred", "proficiency", "proficient", "related",
    "relevant", "remote", "required", "requirement", "requirements", "responsibilities",
    "responsible", "role", "salary", "seeking", "senior", "skill", "skills", "software",
    "solid", "strong", "support", "team", "teams", "understanding", "use", "using", "want",
    "work", "working", "year", "years", "yrs",
];

/// Immutable lookup tables shared across concurrent calls.
#[derive(Debug)]
pub struct SkillsDictionary {
    terms: HashMap<&'static str, SkillTerm>,
    lookup: HashMap<&'static str, &'static str>,
    stop_words: HashSet<&'static str>,
    phrases: AhoCorasick,
    /// Canonical key per automaton pattern id.
    phrase_targets: Vec<&'static str>,
}

static DICTIONARY: OnceLock<SkillsDictionary> = OnceLock::new();

/// Returns the process-wide dictionary, building it on first use.
pub fn dictionary() -> &'static SkillsDictionary {
    DICTIONARY.get_or_init(SkillsDictionary::build)
}

impl SkillsDictionary {
    fn build() -> Self {
        let terms: HashMap<&'static str, SkillTerm> = SKILLS
            .iter()
            .map(|&(canonical, display, category)| (canonical, SkillTerm { display, category }))
            .collect();

        let mut lookup: HashMap<&'static str, &'static str> =
            terms.keys().map(|&k| (k, k)).collect();
        for &(alias, canonical) in ALIASES {
            if terms.contains_key(canonical) {
                lookup.insert(alias, canonical);
            }
        }

        let mut patterns: Vec<(&'static str, &'static str)> =
            lookup.iter().map(|(&k, &v)| (k, v)).collect();
        patterns.sort_unstable();
        let phrases = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .start_kind(StartKind::Anchored)
            .build(patterns.iter().map(|&(key, _)| key))
            .expect("dictionary phrases build a valid automaton");

        Self {
            terms,
            lookup,
            stop_words: STOP_WORDS.iter().copied().collect(),
            phrases,
            phrase_targets: patterns.into_iter().map(|(_, canonical)| canonical).collect(),
        }
    }

    /// Resolves a normalized token or space-joined phrase to its canonical key.
    pub fn canonicalize(&self, phrase: &str) -> Option<&'static str> {
        self.lookup.get(phrase).copied()
    }

    pub fn term(&self, canonical: &str) -> Option<&SkillTerm> {
        self.terms.get(canonical)
    }

    pub fn display(&self, canonical: &str) -> Option<&'static str> {
        self.terms.get(canonical).map(|t| t.display)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Longest dictionary key starting exactly at `span.start` and ending within
    /// `span`, as (end offset, canonical key). `haystack` holds lower-cased words
    /// joined by single spaces.
    pub fn longest_phrase_at(
        &self,
        haystack: &str,
        span: Range<usize>,
    ) -> Option<(usize, &'static str)> {
        let input = Input::new(haystack).span(span).anchored(Anchored::Yes);
        let found = self.phrases.try_find(input).ok().flatten()?;
        Some((found.end(), self.phrase_targets[found.pattern().as_usize()]))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}
