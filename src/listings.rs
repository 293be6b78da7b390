// 🏘️ Listings - In-memory property inventory with client-side filtering
// The listing data is sample inventory or a JSON file; no persistence layer

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// PROPERTY TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Townhouse,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
        }
    }

    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Condo,
        PropertyType::Townhouse,
    ];
}

// ============================================================================
// LISTING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,

    /// Half-baths count as 0.5
    pub bathrooms: f64,

    pub area_sqft: u32,
    pub property_type: PropertyType,
    pub features: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mls_number: Option<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub is_new: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Listing {
    /// Case-insensitive feature lookup
    pub fn has_feature(&self, feature: &str) -> bool {
        let needle = feature.to_lowercase();
        self.features.iter().any(|f| f.to_lowercase() == needle)
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// All criteria are optional; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_beds: Option<u32>,
    pub min_baths: Option<f64>,
    pub min_area_sqft: Option<u32>,
    pub max_area_sqft: Option<u32>,

    /// Empty means any type
    #[serde(default)]
    pub property_types: Vec<PropertyType>,

    /// Every listed feature must be present
    #[serde(default)]
    pub features: Vec<String>,

    /// Free-text match against title, address, MLS number and description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        *self == ListingFilter::default()
    }

    /// Number of active criteria, for the filter badge
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        count += self.min_price.is_some() as usize;
        count += self.max_price.is_some() as usize;
        count += self.min_beds.is_some() as usize;
        count += self.min_baths.is_some() as usize;
        count += self.min_area_sqft.is_some() as usize;
        count += self.max_area_sqft.is_some() as usize;
        count += self.property_types.len();
        count += self.features.len();
        count += self.query.is_some() as usize;
        count
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        if let Some(beds) = self.min_beds {
            if listing.bedrooms < beds {
                return false;
            }
        }
        if let Some(baths) = self.min_baths {
            if listing.bathrooms < baths {
                return false;
            }
        }
        if let Some(min_area) = self.min_area_sqft {
            if listing.area_sqft < min_area {
                return false;
            }
        }
        if let Some(max_area) = self.max_area_sqft {
            if listing.area_sqft > max_area {
                return false;
            }
        }

        if !self.property_types.is_empty()
            && !self.property_types.contains(&listing.property_type)
        {
            return false;
        }

        if !self.features.iter().all(|f| listing.has_feature(f)) {
            return false;
        }

        if let Some(ref query) = self.query {
            let needle = query.to_lowercase();
            let hit = listing.title.to_lowercase().contains(&needle)
                || listing.address.to_lowercase().contains(&needle)
                || listing
                    .mls_number
                    .as_deref()
                    .map(|m| m.to_lowercase().contains(&needle))
                    .unwrap_or(false)
                || listing
                    .description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false);
            if !hit {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// LISTING BOOK
// ============================================================================

pub struct ListingBook {
    listings: Vec<Listing>,
}

impl ListingBook {
    pub fn new(listings: Vec<Listing>) -> Self {
        ListingBook { listings }
    }

    /// Load listings from a JSON file (array of listings)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read listings file: {:?}", path.as_ref()))?;

        let listings: Vec<Listing> = serde_json::from_str(&content)
            .context("Failed to parse listings JSON")?;

        Ok(ListingBook::new(listings))
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Apply a filter, returning matches sorted featured-first then by price
    /// descending (the order the listing grid renders)
    pub fn filter(&self, filter: &ListingFilter) -> Vec<&Listing> {
        let mut matches: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| filter.matches(l))
            .collect();

        matches.sort_by(|a, b| {
            b.is_featured
                .cmp(&a.is_featured)
                .then(b.price.total_cmp(&a.price))
        });

        matches
    }

    /// Demo inventory shipped with the site
    pub fn sample() -> Self {
        let listings = vec![
            Listing {
                id: 1,
                title: "Modern Luxury Villa".to_string(),
                address: "123 Palm Avenue, Waterloo, ON N2L 3G1".to_string(),
                price: 4250000.0,
                bedrooms: 5,
                bathrooms: 4.5,
                area_sqft: 4200,
                property_type: PropertyType::House,
                features: vec!["Pool".to_string(), "Smart Home".to_string(), "View".to_string()],
                mls_number: Some("W5001234".to_string()),
                is_featured: true,
                is_new: false,
                description: None,
            },
            Listing {
                id: 2,
                title: "Downtown Penthouse".to_string(),
                address: "1000 University Avenue, Waterloo, ON N2L 3G5".to_string(),
                price: 3750000.0,
                bedrooms: 3,
                bathrooms: 3.0,
                area_sqft: 3000,
                property_type: PropertyType::Condo,
                features: vec!["Doorman".to_string(), "Terrace".to_string(), "Gym".to_string()],
                mls_number: Some("W5001235".to_string()),
                is_featured: true,
                is_new: false,
                description: None,
            },
            Listing {
                id: 3,
                title: "Waterfront Contemporary".to_string(),
                address: "500 Beach Drive, Waterloo, ON N2L 3G8".to_string(),
                price: 5950000.0,
                bedrooms: 4,
                bathrooms: 4.0,
                area_sqft: 4800,
                property_type: PropertyType::House,
                features: vec![
                    "Waterfront".to_string(),
                    "Pool".to_string(),
                    "Smart Home".to_string(),
                ],
                mls_number: Some("W5001236".to_string()),
                is_featured: true,
                is_new: false,
                description: None,
            },
            Listing {
                id: 4,
                title: "Modern Farmhouse".to_string(),
                address: "42 Meadow Lane, Kitchener, ON N2E 1A1".to_string(),
                price: 2850000.0,
                bedrooms: 4,
                bathrooms: 3.5,
                area_sqft: 3800,
                property_type: PropertyType::House,
                features: vec![
                    "New Construction".to_string(),
                    "Smart Home".to_string(),
                    "Energy Efficient".to_string(),
                ],
                mls_number: Some("W5001237".to_string()),
                is_featured: false,
                is_new: true,
                description: None,
            },
            Listing {
                id: 5,
                title: "Hillside Retreat".to_string(),
                address: "789 Canyon Road, Waterloo, ON N2L 5Y7".to_string(),
                price: 3250000.0,
                bedrooms: 3,
                bathrooms: 3.5,
                area_sqft: 3200,
                property_type: PropertyType::House,
                features: vec![
                    "Views".to_string(),
                    "Pool".to_string(),
                    "Home Office".to_string(),
                ],
                mls_number: Some("W5001238".to_string()),
                is_featured: false,
                is_new: true,
                description: None,
            },
            Listing {
                id: 6,
                title: "Urban Loft".to_string(),
                address: "550 Market Street, Waterloo, ON N2J 4K3".to_string(),
                price: 1750000.0,
                bedrooms: 2,
                bathrooms: 2.0,
                area_sqft: 1800,
                property_type: PropertyType::Apartment,
                features: vec![
                    "Industrial".to_string(),
                    "High Ceilings".to_string(),
                    "City Views".to_string(),
                ],
                mls_number: Some("W5001239".to_string()),
                is_featured: false,
                is_new: true,
                description: None,
            },
        ];

        ListingBook::new(listings)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_all() {
        let book = ListingBook::sample();
        let filter = ListingFilter::default();
        assert_eq!(book.filter(&filter).len(), book.len());
        assert!(filter.is_empty());
        assert_eq!(filter.active_count(), 0);
    }

    #[test]
    fn test_price_range_filter() {
        let book = ListingBook::sample();
        let filter = ListingFilter {
            min_price: Some(2000000.0),
            max_price: Some(4000000.0),
            ..Default::default()
        };

        let matches = book.filter(&filter);
        assert!(!matches.is_empty());
        assert!(matches
            .iter()
            .all(|l| l.price >= 2000000.0 && l.price <= 4000000.0));
    }

    #[test]
    fn test_min_beds_filter() {
        let book = ListingBook::sample();
        let filter = ListingFilter {
            min_beds: Some(4),
            ..Default::default()
        };

        let matches = book.filter(&filter);
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|l| l.bedrooms >= 4));
    }

    #[test]
    fn test_half_bath_filter() {
        let book = ListingBook::sample();
        let filter = ListingFilter {
            min_baths: Some(3.5),
            ..Default::default()
        };

        let matches = book.filter(&filter);
        assert!(matches.iter().all(|l| l.bathrooms >= 3.5));
    }

    #[test]
    fn test_property_type_filter() {
        let book = ListingBook::sample();
        let filter = ListingFilter {
            property_types: vec![PropertyType::Condo, PropertyType::Apartment],
            ..Default::default()
        };

        let matches = book.filter(&filter);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_feature_filter_is_case_insensitive() {
        let book = ListingBook::sample();
        let filter = ListingFilter {
            features: vec!["pool".to_string()],
            ..Default::default()
        };

        let matches = book.filter(&filter);
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|l| l.has_feature("Pool")));
    }

    #[test]
    fn test_query_filter() {
        let book = ListingBook::sample();
        let filter = ListingFilter {
            query: Some("kitchener".to_string()),
            ..Default::default()
        };

        let matches = book.filter(&filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Modern Farmhouse");
    }

    #[test]
    fn test_sort_order_featured_then_price() {
        let book = ListingBook::sample();
        let matches = book.filter(&ListingFilter::default());

        // Featured listings lead, highest price first within each group
        assert!(matches[0].is_featured);
        assert_eq!(matches[0].price, 5950000.0);
        assert!(!matches[matches.len() - 1].is_featured);
    }

    #[test]
    fn test_get_by_id() {
        let book = ListingBook::sample();
        assert_eq!(book.get(6).unwrap().title, "Urban Loft");
        assert!(book.get(999).is_none());
    }

    #[test]
    fn test_listing_json_round_trip() {
        let book = ListingBook::sample();
        let json = serde_json::to_string(book.all()).unwrap();
        let parsed: Vec<Listing> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book.all());
    }
}
