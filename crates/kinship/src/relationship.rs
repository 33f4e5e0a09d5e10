use crate::UNRELATED;
use lineage_graph::ParentRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direct ancestors and descendants get a name up to this degree
const MAX_LINE_DEGREE: i32 = 10;
/// Cousins get a name up to this degree
const MAX_COUSIN_DEGREE: i32 = 12;
/// Aunts, uncles, nieces and nephews get a name up to this degree
const MAX_EXTENDED_DEGREE: i32 = 10;
/// Beyond this degree persons are reported as unrelated
const MAX_RELATIVE_DEGREE: i32 = 15;

/// Language of the relationship labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Ukrainian,
}

/// Broad kind of a relationship, which decides its colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(rename = "self")]
    Myself,
    Partner,
    Parent,
    Child,
    Sibling,
    Extended,
    Distant,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Myself => "self",
            Category::Partner => "partner",
            Category::Parent => "parent",
            Category::Child => "child",
            Category::Sibling => "sibling",
            Category::Extended => "extended",
            Category::Distant => "distant",
        }
    }

    /// Caption of the category in the legend
    pub fn caption(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Category::Myself) => "Focus person",
            (Locale::English, Category::Parent) => "Parents / ancestors",
            (Locale::English, Category::Child) => "Children / descendants",
            (Locale::English, Category::Partner) => "Partners",
            (Locale::English, Category::Sibling) => "Siblings / cousins",
            (Locale::English, Category::Extended) => "Aunts, uncles / nieces, nephews",
            (Locale::English, Category::Distant) => "Distant relatives",
            (Locale::Ukrainian, Category::Myself) => "Фокусна людина",
            (Locale::Ukrainian, Category::Parent) => "Батьки/Предки",
            (Locale::Ukrainian, Category::Child) => "Діти/Нащадки",
            (Locale::Ukrainian, Category::Partner) => "Партнери",
            (Locale::Ukrainian, Category::Sibling) => "Брати/Сестри",
            (Locale::Ukrainian, Category::Extended) => "Дядьки/Племінники",
            (Locale::Ukrainian, Category::Distant) => "Далекі родичі",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Relationship of a person as seen from the focus person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relationship {
    Myself,
    Partner,
    /// Direct ancestor, `degree` generations up. The role is known for a
    /// parent named in the focus record.
    Ancestor {
        degree: i32,
        role: Option<ParentRole>,
    },
    /// Direct descendant, `degree` generations down
    Descendant { degree: i32 },
    Sibling,
    /// Same generation, `rank` 1 for first cousins
    Cousin { rank: i32 },
    /// One generation up, `rank` 0 for a parent's sibling, otherwise the
    /// cousin rank of the parent
    AuntUncle { rank: i32 },
    /// One generation down, mirror of [`Relationship::AuntUncle`]
    NieceNephew { rank: i32 },
    /// Related, without a name for it
    Relative { degree: i32 },
    /// Too far in a known direction to be named
    Undetermined,
    Unrelated,
}

/// What is known about a pair of persons when classifying it
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Facts {
    pub same: bool,
    pub partner: bool,
    pub sibling: bool,
    pub generation: i32,
    pub degree: i32,
    /// Slot the person occupies in the focus record, if any
    pub role: Option<ParentRole>,
}

impl Relationship {
    /// Classify a pair, rules are tried in order and the first match wins
    pub(crate) fn classify(facts: &Facts) -> Self {
        use Relationship::*;

        if facts.same {
            return Myself;
        }
        if facts.partner {
            return Partner;
        }

        let (generation, degree) = (facts.generation, facts.degree);
        if degree == UNRELATED {
            return Unrelated;
        }

        match generation {
            // Direct line, the degree is the number of generations
            g if g < 0 && degree == -g => {
                if degree <= MAX_LINE_DEGREE {
                    Ancestor {
                        degree,
                        role: facts.role.filter(|_| degree == 1),
                    }
                } else {
                    Undetermined
                }
            }
            g if g > 0 && degree == g => {
                if degree <= MAX_LINE_DEGREE {
                    Descendant { degree }
                } else {
                    Undetermined
                }
            }
            0 if facts.sibling && degree == 2 => Sibling,
            0 if degree >= 4 && degree <= MAX_COUSIN_DEGREE && degree % 2 == 0 => Cousin {
                rank: degree / 2 - 1,
            },
            0 if degree > MAX_COUSIN_DEGREE => Undetermined,
            -1 if degree == 3 => AuntUncle { rank: 0 },
            -1 if degree > 3 && degree <= MAX_EXTENDED_DEGREE => AuntUncle {
                rank: extended_rank(degree),
            },
            1 if degree == 3 => NieceNephew { rank: 0 },
            1 if degree > 3 && degree <= MAX_EXTENDED_DEGREE => NieceNephew {
                rank: extended_rank(degree),
            },
            _ if degree < MAX_RELATIVE_DEGREE => Relative { degree },
            _ => Unrelated,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Relationship::Myself => Category::Myself,
            Relationship::Partner => Category::Partner,
            Relationship::Ancestor { .. } => Category::Parent,
            Relationship::Descendant { .. } => Category::Child,
            Relationship::Sibling | Relationship::Cousin { .. } => Category::Sibling,
            Relationship::AuntUncle { .. } | Relationship::NieceNephew { .. } => {
                Category::Extended
            }
            Relationship::Relative { .. } | Relationship::Undetermined | Relationship::Unrelated => {
                Category::Distant
            }
        }
    }

    /// Human readable name of the relationship
    pub fn label(&self, locale: Locale) -> String {
        match locale {
            Locale::English => self.english_label(),
            Locale::Ukrainian => self.ukrainian_label(),
        }
    }

    fn english_label(&self) -> String {
        match *self {
            Relationship::Myself => "self".into(),
            Relationship::Partner => "partner".into(),
            Relationship::Ancestor { degree: 1, role } => match role {
                Some(ParentRole::Father) => "father".into(),
                Some(ParentRole::Mother) => "mother".into(),
                None => "parent".into(),
            },
            Relationship::Ancestor { degree, .. } => lineal("grandparent", degree),
            Relationship::Descendant { degree: 1 } => "child".into(),
            Relationship::Descendant { degree } => lineal("grandchild", degree),
            Relationship::Sibling => "sibling".into(),
            Relationship::Cousin { rank } => format!("{} cousin", ordinal(rank)),
            Relationship::AuntUncle { rank: 0 } => "aunt/uncle".into(),
            Relationship::AuntUncle { rank } => format!("{}-cousin aunt/uncle", ordinal(rank)),
            Relationship::NieceNephew { rank: 0 } => "niece/nephew".into(),
            Relationship::NieceNephew { rank } => {
                format!("{}-cousin niece/nephew", ordinal(rank))
            }
            Relationship::Relative { degree } => format!("relative ({degree}° of kinship)"),
            Relationship::Undetermined => "undetermined".into(),
            Relationship::Unrelated => "unrelated".into(),
        }
    }

    fn ukrainian_label(&self) -> String {
        match *self {
            Relationship::Myself => "Я".into(),
            Relationship::Partner => "Партнер/Дружина".into(),
            Relationship::Ancestor { degree: 1, role } => match role {
                Some(ParentRole::Father) => "Батько".into(),
                Some(ParentRole::Mother) => "Мати".into(),
                None => "Батько/Мати".into(),
            },
            Relationship::Ancestor { degree: 2, .. } => "Дідусь/Бабуся".into(),
            Relationship::Ancestor { degree: 3, .. } => "Прадід/Прабабуся".into(),
            Relationship::Ancestor { degree: 4, .. } => "Прапрадід/Прапрабабуся".into(),
            Relationship::Ancestor { degree, .. } => format!("Пра({})дід/бабуся", degree - 2),
            Relationship::Descendant { degree: 1 } => "Син/Дочка".into(),
            Relationship::Descendant { degree: 2 } => "Онук/Онука".into(),
            Relationship::Descendant { degree: 3 } => "Правнук/Правнучка".into(),
            Relationship::Descendant { degree: 4 } => "Праправнук/Праправнучка".into(),
            Relationship::Descendant { degree } => format!("Пра({})внук/внучка", degree - 2),
            Relationship::Sibling => "Брат/Сестра".into(),
            Relationship::Cousin { rank: 1 } => "Двоюрідний брат/сестра".into(),
            Relationship::Cousin { rank: 2 } => "Троюрідний брат/сестра".into(),
            Relationship::Cousin { rank } => format!("{rank}-юрідний брат/сестра"),
            Relationship::AuntUncle { rank: 0 } => "Дядько/Тітка".into(),
            Relationship::AuntUncle { rank: 1 } => "Двоюрідний дядько/тітка".into(),
            Relationship::AuntUncle { rank } => format!("{rank}-юрідний дядько/тітка"),
            Relationship::NieceNephew { rank: 0 } => "Племінник/Племінниця".into(),
            Relationship::NieceNephew { rank: 1 } => "Двоюрідний племінник/племінниця".into(),
            Relationship::NieceNephew { rank } => format!("{rank}-юрідний племінник/племінниця"),
            Relationship::Relative { degree } => format!("Родич ({degree}° спорідненості)"),
            Relationship::Undetermined => "Не визначено".into(),
            Relationship::Unrelated => "Не визначено (не пов'язані)".into(),
        }
    }
}

/// Cousin rank of an aunt/uncle or niece/nephew further than degree 3,
/// the first two ranks are both named as first cousins
fn extended_rank(degree: i32) -> i32 {
    let rank = (degree - 2) / 2;
    if rank <= 2 {
        1
    } else {
        rank
    }
}

fn lineal(base: &str, degree: i32) -> String {
    match degree {
        2 => base.to_string(),
        3 => format!("great-{base}"),
        4 => format!("great-great-{base}"),
        _ => format!("{}-greats-{base}", degree - 2),
    }
}

fn ordinal(n: i32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn classify(generation: i32, degree: i32) -> Relationship {
        Relationship::classify(&Facts {
            generation,
            degree,
            ..Default::default()
        })
    }

    #[test]
    fn test_direct_line() {
        assert_eq!(
            classify(-1, 1),
            Relationship::Ancestor {
                degree: 1,
                role: None
            }
        );
        assert_eq!(classify(-2, 2).label(Locale::English), "grandparent");
        assert_eq!(classify(-3, 3).label(Locale::English), "great-grandparent");
        assert_eq!(
            classify(-4, 4).label(Locale::English),
            "great-great-grandparent"
        );
        assert_eq!(
            classify(-7, 7).label(Locale::English),
            "5-greats-grandparent"
        );
        assert_eq!(classify(-11, 11), Relationship::Undetermined);
        assert_eq!(classify(3, 3).label(Locale::English), "great-grandchild");
        assert_eq!(classify(10, 10).label(Locale::English), "8-greats-grandchild");
        assert_eq!(classify(12, 12), Relationship::Undetermined);
    }

    #[test]
    fn test_parent_role() {
        let father = Relationship::classify(&Facts {
            generation: -1,
            degree: 1,
            role: Some(ParentRole::Father),
            ..Default::default()
        });
        assert_eq!(father.label(Locale::English), "father");
        assert_eq!(father.label(Locale::Ukrainian), "Батько");
        assert_eq!(father.category(), Category::Parent);
    }

    #[test]
    fn test_same_generation() {
        let sibling = Relationship::classify(&Facts {
            sibling: true,
            degree: 2,
            ..Default::default()
        });
        assert_eq!(sibling, Relationship::Sibling);
        // A half sibling not matching the sibling rule is only a relative
        assert_eq!(classify(0, 2), Relationship::Relative { degree: 2 });
        assert_eq!(classify(0, 4).label(Locale::English), "1st cousin");
        assert_eq!(classify(0, 6).label(Locale::English), "2nd cousin");
        assert_eq!(classify(0, 8).label(Locale::English), "3rd cousin");
        assert_eq!(classify(0, 12).label(Locale::English), "5th cousin");
        assert_eq!(classify(0, 8).label(Locale::Ukrainian), "3-юрідний брат/сестра");
        assert_eq!(classify(0, 14), Relationship::Undetermined);
    }

    #[test]
    fn test_extended_family() {
        assert_eq!(classify(-1, 3), Relationship::AuntUncle { rank: 0 });
        assert_eq!(classify(-1, 5), Relationship::AuntUncle { rank: 1 });
        assert_eq!(classify(-1, 7), Relationship::AuntUncle { rank: 1 });
        assert_eq!(classify(-1, 9), Relationship::AuntUncle { rank: 3 });
        assert_eq!(
            classify(-1, 9).label(Locale::English),
            "3rd-cousin aunt/uncle"
        );
        assert_eq!(classify(1, 3).label(Locale::English), "niece/nephew");
        assert_eq!(
            classify(1, 5).label(Locale::Ukrainian),
            "Двоюрідний племінник/племінниця"
        );
        assert_eq!(classify(1, 3).category(), Category::Extended);
    }

    #[test]
    fn test_fallbacks() {
        // Great aunt: two generations up, not on the direct line
        assert_eq!(classify(-2, 4), Relationship::Relative { degree: 4 });
        assert_eq!(
            classify(-2, 4).label(Locale::English),
            "relative (4° of kinship)"
        );
        assert_eq!(classify(-3, 15), Relationship::Unrelated);
        assert_eq!(classify(UNRELATED, UNRELATED), Relationship::Unrelated);
        assert_eq!(classify(2, 14).category(), Category::Distant);
    }

    #[test]
    fn test_self_and_partner_win() {
        let partner = Relationship::classify(&Facts {
            partner: true,
            generation: -1,
            degree: 1,
            ..Default::default()
        });
        assert_eq!(partner, Relationship::Partner);

        let same = Relationship::classify(&Facts {
            same: true,
            partner: true,
            ..Default::default()
        });
        assert_eq!(same, Relationship::Myself);
        assert_eq!(same.label(Locale::Ukrainian), "Я");
    }

    #[test]
    fn test_ordinals() {
        let ordinals: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22].map(ordinal).into();
        assert_eq!(
            ordinals,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd"]
        );
    }
}
