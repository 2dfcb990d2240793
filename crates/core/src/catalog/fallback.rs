//! Static fallback catalog.

use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::Product;
use crate::types::{Badge, Category, ProductId};

struct Entry {
    id: &'static str,
    name: &'static str,
    category: Category,
    price: i64,
    image: &'static str,
    badge: Option<Badge>,
    short: &'static str,
}

const ENTRIES: [Entry; 13] = [
    Entry {
        id: "n1",
        name: "Celeste Étoile Necklace",
        category: Category::Necklaces,
        price: 1699,
        image: "/static/images/neck1.jpg",
        badge: Some(Badge::Bestseller),
        short: "A constellation of brilliant-cut stones on a fine 18k chain.",
    },
    Entry {
        id: "n2",
        name: "Aurora Tennis Necklace",
        category: Category::Necklaces,
        price: 2990,
        image: "/static/images/neck2.jpg",
        badge: None,
        short: "An unbroken line of graduated diamonds set in white gold.",
    },
    Entry {
        id: "n3",
        name: "Lumière Pearl Collar",
        category: Category::Necklaces,
        price: 2140,
        image: "/static/images/neck3.jpg",
        badge: Some(Badge::Limited),
        short: "Hand-knotted South Sea pearls with a pavé clasp.",
    },
    Entry {
        id: "n4",
        name: "Seraphine Halo Pendant",
        category: Category::Necklaces,
        price: 1290,
        image: "/static/images/neck4.jpg",
        badge: None,
        short: "A cushion-cut centre stone framed by a delicate halo.",
    },
    Entry {
        id: "e1",
        name: "Opaline Drop Earrings",
        category: Category::Earrings,
        price: 840,
        image: "/static/images/earring1.jpg",
        badge: Some(Badge::New),
        short: "Softly glowing opal drops suspended from gold huggies.",
    },
    Entry {
        id: "e2",
        name: "Solstice Diamond Hoops",
        category: Category::Earrings,
        price: 1460,
        image: "/static/images/earring2.jpg",
        badge: None,
        short: "Slim hoops lined inside and out with micro-pavé diamonds.",
    },
    Entry {
        id: "e3",
        name: "Éclat Pearl Studs",
        category: Category::Earrings,
        price: 690,
        image: "/static/images/earring3.jpg",
        badge: None,
        short: "Classic Akoya pearl studs for every day.",
    },
    Entry {
        id: "r1",
        name: "Ethereal Halo Ring",
        category: Category::Rings,
        price: 1890,
        image: "/static/images/ring1.jpg",
        badge: Some(Badge::Bestseller),
        short: "A round solitaire lifted by a floating halo.",
    },
    Entry {
        id: "r2",
        name: "Sapphire Enchant Ring",
        category: Category::Rings,
        price: 2350,
        image: "/static/images/ring2.jpg",
        badge: None,
        short: "A deep Ceylon sapphire flanked by tapered baguettes.",
    },
    Entry {
        id: "r3",
        name: "Nocturne Pavé Band",
        category: Category::Rings,
        price: 980,
        image: "/static/images/ring3.jpg",
        badge: Some(Badge::Limited),
        short: "Black rhodium band set edge to edge with pavé stones.",
    },
    Entry {
        id: "b1",
        name: "Aurora Line Bracelet",
        category: Category::Bracelets,
        price: 1640,
        image: "/static/images/brace1.jpg",
        badge: None,
        short: "A supple line of bezel-set diamonds.",
    },
    Entry {
        id: "b2",
        name: "Gilded Curb Chain",
        category: Category::Bracelets,
        price: 1120,
        image: "/static/images/brace2.jpg",
        badge: Some(Badge::New),
        short: "A bold polished curb chain in 18k yellow gold.",
    },
    Entry {
        id: "b3",
        name: "Étoile Tennis Bracelet",
        category: Category::Bracelets,
        price: 2490,
        image: "/static/images/brace3.jpg",
        badge: None,
        short: "Star-set diamonds that catch the light from every angle.",
    },
];

static FALLBACK: LazyLock<Vec<Product>> =
    LazyLock::new(|| ENTRIES.iter().map(Entry::to_product).collect());

impl Entry {
    fn to_product(&self) -> Product {
        Product {
            id: ProductId::new(self.id),
            slug: slugify(self.name),
            name: self.name.to_owned(),
            category: self.category,
            price: Decimal::from(self.price),
            images: vec![self.image.to_owned()],
            badge: self.badge,
            tags: vec![self.category.as_str().to_owned()],
            in_stock: true,
            short_description: self.short.to_owned(),
            description: self.short.to_owned(),
            created_at: None,
        }
    }
}

/// The curated products shown when the live catalog is unavailable.
#[must_use]
pub fn fallback_catalog() -> &'static [Product] {
    &FALLBACK
}

/// Look up a fallback product by id.
#[must_use]
pub fn fallback_product(id: &ProductId) -> Option<&'static Product> {
    FALLBACK.iter().find(|p| &p.id == id)
}

/// Lowercase ASCII slug; accented Latin letters fold to their base letter.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        let folded = match c {
            'à' | 'á' | 'â' | 'ä' | 'À' | 'Á' | 'Â' | 'Ä' => 'a',
            'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            other => other.to_ascii_lowercase(),
        };
        if folded.is_ascii_alphanumeric() {
            slug.push(folded);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_thirteen_unique_products() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 13);

        let ids: HashSet<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        let slugs: HashSet<_> = catalog.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(ids.len(), 13);
        assert_eq!(slugs.len(), 13);
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Celeste Étoile Necklace"), "celeste-etoile-necklace");
        assert_eq!(slugify("Nocturne Pavé Band"), "nocturne-pave-band");
        assert_eq!(slugify("  Lumière -- Pearl  "), "lumiere-pearl");
    }

    #[test]
    fn test_prices_within_default_cap() {
        assert!(
            fallback_catalog()
                .iter()
                .all(|p| p.price <= Decimal::from(3000) && p.price > Decimal::ZERO)
        );
    }

    #[test]
    fn test_fallback_product_lookup() {
        let ring = fallback_product(&ProductId::new("r2"));
        assert_eq!(ring.map(|p| p.name.as_str()), Some("Sapphire Enchant Ring"));
        assert!(fallback_product(&ProductId::new("zz")).is_none());
    }
}
