/// The five known categories have badges; anything else still renders with
/// its own label but is never counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Web,
    Misc,
    Crypto,
    Pwn,
    Forensics,
    Other(&'static str),
}

impl Category {
    pub const KNOWN: [Category; 5] = [
        Category::Web,
        Category::Misc,
        Category::Crypto,
        Category::Pwn,
        Category::Forensics,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Misc => "misc",
            Category::Crypto => "crypto",
            Category::Pwn => "pwn",
            Category::Forensics => "forensics",
            Category::Other(label) => *label,
        }
    }

    pub fn label(&self) -> String {
        self.slug().to_uppercase()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeFilter {
    All,
    Only(Category),
}

impl ChallengeFilter {
    pub const TABS: [ChallengeFilter; 6] = [
        ChallengeFilter::All,
        ChallengeFilter::Only(Category::Web),
        ChallengeFilter::Only(Category::Misc),
        ChallengeFilter::Only(Category::Crypto),
        ChallengeFilter::Only(Category::Pwn),
        ChallengeFilter::Only(Category::Forensics),
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ChallengeFilter::All => "all",
            ChallengeFilter::Only(category) => category.slug(),
        }
    }

    pub fn label(&self) -> String {
        self.slug().to_uppercase()
    }

    pub fn matches(&self, record: &ChallengeRecord) -> bool {
        match self {
            ChallengeFilter::All => true,
            ChallengeFilter::Only(category) => record.category == *category,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeRecord {
    pub title: &'static str,
    pub file: &'static str,
    pub flag: &'static str,
    pub category: Category,
}

impl ChallengeRecord {
    pub fn card_text(&self) -> String {
        format!(
            "{} {} Flag: {} Click for writeup",
            self.category.label(),
            self.title,
            self.flag
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticipationRecord {
    pub name: &'static str,
    pub solve_summary: &'static str,
    pub status: &'static str,
    pub link: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

impl CategoryCount {
    pub fn badge_text(&self) -> String {
        format!("{} • {}", self.category.label(), self.count)
    }
}

const CHALLENGES: &[ChallengeRecord] = &[
    ChallengeRecord {
        title: "Graph grief",
        file: "CTF/Nite2025/GraphGrief",
        flag: "nite{Th3_Qu4ntum_****}",
        category: Category::Web,
    },
    ChallengeRecord {
        title: "Connection Tester",
        file: "CTF/PatriotCTF2025/Web/ConnectionTester",
        flag: "PCTF{C0nnection_****}",
        category: Category::Web,
    },
    ChallengeRecord {
        title: "Feedback Fallout",
        file: "CTF/PatriotCTF2025/Web/FeedbackFallout",
        flag: "PCTF{SQLI_****}",
        category: Category::Web,
    },
    ChallengeRecord {
        title: "Secure Auth",
        file: "CTF/PatriotCTF2025/Web/SecureAuth",
        flag: "PCTF{cant_****}",
        category: Category::Web,
    },
    ChallengeRecord {
        title: "Trust Fall",
        file: "CTF/PatriotCTF2025/Web/TrustFall",
        flag: "PCTF{auth_****}",
        category: Category::Web,
    },
    ChallengeRecord {
        title: "Trust Vault",
        file: "CTF/PatriotCTF2025/Web/TrustVault",
        flag: "FLAG{py7h0n_****}",
        category: Category::Web,
    },
    ChallengeRecord {
        title: "Reverse Metadata Part 1",
        file: "CTF/PatriotCTF2025/Misc/ReverseMetaData1",
        flag: "MASONCC{images_****}",
        category: Category::Misc,
    },
    ChallengeRecord {
        title: "Reverse Metadata Part 2",
        file: "CTF/PatriotCTF2025/Misc/ReverseMetaData2",
        flag: "PCTF{hidden_****}",
        category: Category::Misc,
    },
];

const PARTICIPATIONS: &[ParticipationRecord] = &[
    ParticipationRecord {
        name: "PatriotCTF 2025",
        solve_summary: "7+ solves",
        status: "Ended",
        link: "CTF/PatriotCTF2025/patriotctf2025",
    },
    ParticipationRecord {
        name: "NiteCTF 2025",
        solve_summary: "1 solves",
        status: "Ended",
        link: "CTF/Nite2025/GraphGrief.html",
    },
];

const RECENT_SOLVES_LIMIT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Catalog {
    challenges: &'static [ChallengeRecord],
    participations: &'static [ParticipationRecord],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CHALLENGES, PARTICIPATIONS)
    }
}

impl Catalog {
    pub fn new(
        challenges: &'static [ChallengeRecord],
        participations: &'static [ParticipationRecord],
    ) -> Self {
        Self {
            challenges,
            participations,
        }
    }

    pub fn challenges(&self) -> &'static [ChallengeRecord] {
        self.challenges
    }

    pub fn participations(&self) -> &'static [ParticipationRecord] {
        self.participations
    }

    pub fn filtered(&self, filter: ChallengeFilter) -> Vec<&'static ChallengeRecord> {
        self.challenges
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    pub fn recent_solves(&self) -> Vec<&'static ChallengeRecord> {
        let start = self.challenges.len().saturating_sub(RECENT_SOLVES_LIMIT);
        self.challenges[start..].iter().rev().collect()
    }

    pub fn category_stats(&self) -> Vec<CategoryCount> {
        let mut counts = [0usize; Category::KNOWN.len()];
        for record in self.challenges {
            if let Some(index) = Category::KNOWN
                .iter()
                .position(|category| *category == record.category)
            {
                counts[index] += 1;
            }
        }
        Category::KNOWN
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryCount {
                category: *category,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MIXED: &[ChallengeRecord] = &[
        ChallengeRecord {
            title: "one",
            file: "a/1",
            flag: "f{1}",
            category: Category::Pwn,
        },
        ChallengeRecord {
            title: "two",
            file: "a/2",
            flag: "f{2}",
            category: Category::Other("osint"),
        },
        ChallengeRecord {
            title: "three",
            file: "a/3",
            flag: "f{3}",
            category: Category::Pwn,
        },
        ChallengeRecord {
            title: "four",
            file: "a/4",
            flag: "f{4}",
            category: Category::Crypto,
        },
        ChallengeRecord {
            title: "five",
            file: "a/5",
            flag: "f{5}",
            category: Category::Web,
        },
    ];

    fn titles(records: &[&ChallengeRecord]) -> Vec<&'static str> {
        records.iter().map(|record| record.title).collect()
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let catalog = Catalog::new(MIXED, &[]);
        assert_eq!(
            titles(&catalog.filtered(ChallengeFilter::Only(Category::Pwn))),
            vec!["one", "three"]
        );
        assert_eq!(
            titles(&catalog.filtered(ChallengeFilter::All)),
            vec!["one", "two", "three", "four", "five"]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let catalog = Catalog::default();
        for filter in ChallengeFilter::TABS {
            assert_eq!(catalog.filtered(filter), catalog.filtered(filter));
        }
    }

    #[test]
    fn filter_without_matches_is_empty() {
        let catalog = Catalog::default();
        assert!(catalog
            .filtered(ChallengeFilter::Only(Category::Forensics))
            .is_empty());
    }

    #[test]
    fn recent_solves_newest_first() {
        let catalog = Catalog::new(MIXED, &[]);
        assert_eq!(
            titles(&catalog.recent_solves()),
            vec!["five", "four", "three", "two"]
        );
        assert_eq!(
            titles(&catalog.recent_solves()),
            vec!["five", "four", "three", "two"]
        );
        assert_eq!(titles(&catalog.filtered(ChallengeFilter::All))[0], "one");
    }

    #[test]
    fn recent_solves_short_catalog() {
        let catalog = Catalog::new(&MIXED[..2], &[]);
        assert_eq!(titles(&catalog.recent_solves()), vec!["two", "one"]);
        assert!(Catalog::new(&[], &[]).recent_solves().is_empty());
    }

    #[test]
    fn stats_skip_unknown_and_empty_categories() {
        let catalog = Catalog::new(MIXED, &[]);
        let badges: Vec<String> = catalog
            .category_stats()
            .iter()
            .map(CategoryCount::badge_text)
            .collect();
        assert_eq!(badges, vec!["WEB • 1", "CRYPTO • 1", "PWN • 2"]);
    }

    #[test]
    fn builtin_stats_match_records() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.category_stats(),
            vec![
                CategoryCount {
                    category: Category::Web,
                    count: 6
                },
                CategoryCount {
                    category: Category::Misc,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn card_text_includes_flag_and_tag() {
        let record = &Catalog::default().challenges()[4];
        assert_eq!(
            record.card_text(),
            "WEB Trust Fall Flag: PCTF{auth_****} Click for writeup"
        );
    }
}
