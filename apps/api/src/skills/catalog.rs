//! Default skill catalog shipped with the service.
//! Canonical names must stay unique case-insensitively across every category.

use crate::skills::taxonomy::{SkillCategory, Taxonomy, TaxonomyError};

pub const DEFAULT_CATALOG: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::ProgrammingLanguages,
        &[
            "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Go", "Rust", "Swift",
            "Kotlin", "Ruby", "PHP", "Perl", "Scala", "R", "C", "MATLAB", "Julia", "Dart",
            "Lua", "Haskell", "Erlang", "Elixir", "Clojure", "F#", "Objective-C", "SQL",
        ],
    ),
    (
        SkillCategory::WebFrameworks,
        &[
            "React", "Vue.js", "Vue", "Angular", "Next.js", "Node.js", "Express", "Django",
            "Flask", "FastAPI", "Spring Boot", "Spring", "ASP.NET", "Laravel", "Symfony",
            "Ruby on Rails", "Rails", "Ember.js", "Svelte", "Nuxt.js", "Gatsby", "Remix",
            "SvelteKit",
        ],
    ),
    (
        SkillCategory::FrontendTechnologies,
        &[
            "HTML", "HTML5", "CSS", "CSS3", "SASS", "SCSS", "LESS", "Tailwind CSS", "Bootstrap",
            "Material-UI", "MUI", "Styled Components", "Webpack", "Vite", "Parcel", "Babel",
            "ESLint", "Prettier",
        ],
    ),
    (
        SkillCategory::BackendTechnologies,
        &[
            "REST API", "REST", "GraphQL", "gRPC", "WebSocket", "SOAP", "Microservices",
            "Serverless", "Lambda", "API Gateway",
        ],
    ),
    (
        SkillCategory::Databases,
        &[
            "MongoDB", "PostgreSQL", "MySQL", "Redis", "SQLite", "Oracle", "SQL Server",
            "Cassandra", "DynamoDB", "Firebase", "Firestore", "Elasticsearch", "Neo4j",
            "CouchDB", "MariaDB",
        ],
    ),
    (
        SkillCategory::CloudDevOps,
        &[
            "AWS", "Azure", "GCP", "Google Cloud", "Docker", "Kubernetes", "K8s", "CI/CD",
            "Jenkins", "GitLab CI", "GitHub Actions", "Travis CI", "CircleCI", "Terraform",
            "Ansible", "Chef", "Puppet", "Vagrant", "Linux", "Unix", "Bash", "Shell Scripting",
            "PowerShell",
        ],
    ),
    (
        SkillCategory::ToolsTechnologies,
        &[
            "Git", "GitHub", "GitLab", "Bitbucket", "SVN", "Mercurial", "Jira", "Confluence",
            "Trello", "Asana", "Slack", "Microsoft Teams", "Postman",
        ],
    ),
    (
        SkillCategory::Testing,
        &[
            "Jest", "Mocha", "Chai", "Cypress", "Selenium", "Playwright", "Pytest", "JUnit",
            "TestNG", "RSpec", "PHPUnit", "XCTest",
        ],
    ),
    (
        SkillCategory::MobileDevelopment,
        &[
            "React Native", "Flutter", "Ionic", "Xamarin", "Android", "iOS", "SwiftUI",
            "Kotlin Multiplatform", "Cordova", "PhoneGap",
        ],
    ),
    (
        SkillCategory::DataScience,
        &[
            "Machine Learning", "ML", "Deep Learning", "Neural Networks", "TensorFlow",
            "PyTorch", "Keras", "Scikit-learn", "Pandas", "NumPy", "Matplotlib", "Seaborn",
            "Jupyter", "Data Science", "Data Analysis", "Statistics", "NLP",
            "Natural Language Processing", "Computer Vision", "OpenCV",
        ],
    ),
    (
        SkillCategory::BigData,
        &["Hadoop", "Spark", "Kafka", "Hive", "Pig", "HBase", "Storm", "Flink"],
    ),
    (
        SkillCategory::Design,
        &[
            "Figma", "Adobe XD", "Sketch", "Photoshop", "Illustrator", "InDesign", "UI/UX",
            "User Research", "Prototyping", "Design Systems", "Wireframing",
        ],
    ),
    (
        SkillCategory::Methodologies,
        &["Agile", "Scrum", "Kanban", "Waterfall", "DevOps", "Lean", "SAFe"],
    ),
    (
        SkillCategory::SoftSkills,
        &[
            "Project Management", "Team Leadership", "Leadership", "Communication",
            "Problem Solving", "Critical Thinking", "Collaboration", "Time Management",
            "Adaptability", "Mentoring", "Code Review", "Technical Writing",
            "Presentation Skills",
        ],
    ),
    (
        SkillCategory::OtherTechnologies,
        &[
            "Blockchain", "Ethereum", "Solidity", "Smart Contracts", "Cryptocurrency", "IoT",
            "Internet of Things", "Arduino", "Raspberry Pi", "Game Development", "Unity",
            "Unreal Engine", "Cocos2d", "Cybersecurity", "Penetration Testing",
            "Ethical Hacking", "Network Security",
        ],
    ),
];

/// `(alias, canonical target)` pairs.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("ecmascript", "JavaScript"),
    ("ts", "TypeScript"),
    ("golang", "Go"),
    ("cpp", "C++"),
    ("csharp", "C#"),
    ("reactjs", "React"),
    ("react.js", "React"),
    ("vuejs", "Vue.js"),
    ("nodejs", "Node.js"),
    ("postgres", "PostgreSQL"),
    ("mongo", "MongoDB"),
    ("sklearn", "Scikit-learn"),
    ("tf", "TensorFlow"),
    ("amazon web services", "AWS"),
    ("google cloud platform", "Google Cloud"),
    ("ror", "Ruby on Rails"),
];

/// Builds the taxonomy every running instance uses.
pub fn default_taxonomy() -> Result<Taxonomy, TaxonomyError> {
    Taxonomy::new(DEFAULT_CATALOG, DEFAULT_ALIASES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_builds() {
        let taxonomy = default_taxonomy().expect("default catalog must be unambiguous");
        assert!(taxonomy.len() > 200);
        assert_eq!(taxonomy.categories().len(), SkillCategory::ALL.len());
    }

    #[test]
    fn test_default_aliases_resolve() {
        let taxonomy = default_taxonomy().unwrap();
        assert_eq!(taxonomy.resolve("JS").unwrap().name, "JavaScript");
        assert_eq!(taxonomy.resolve("golang").unwrap().name, "Go");
        assert_eq!(taxonomy.resolve("Postgres").unwrap().name, "PostgreSQL");
    }

    #[test]
    fn test_single_letter_skills_are_languages() {
        let taxonomy = default_taxonomy().unwrap();
        assert_eq!(taxonomy.category_of("R"), Some(SkillCategory::ProgrammingLanguages));
        assert_eq!(taxonomy.category_of("c"), Some(SkillCategory::ProgrammingLanguages));
    }
}
