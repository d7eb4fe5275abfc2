use rand::Rng;
use serde::{Deserialize, Serialize};

use super::RecordId;

/// A named, colored grouping for expenses.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    /// Display name, e.g. "Food". Kept in the casing it was created with.
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

/// Looks up a category by name, ignoring case.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let name = name.to_lowercase();
    categories.iter().find(|category| category.name.to_lowercase() == name)
}

/// Picks a random color as `#` followed by six lowercase hex digits.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..=0xff_ffff_u32))
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category { id: RecordId(id.to_owned()), name: name.to_owned(), color: "#336699".to_owned() }
    }

    #[test]
    fn lookup_ignores_case() {
        let categories = vec![category("1", "Food"), category("2", "Rent")];
        assert_eq!(find_by_name(&categories, "food"), Some(&categories[0]));
        assert_eq!(find_by_name(&categories, "RENT"), Some(&categories[1]));
        assert_eq!(find_by_name(&categories, "travel"), None);
    }

    #[test]
    fn colors_are_always_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let color = random_color(&mut rng);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }
}
