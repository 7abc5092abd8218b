use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const LISTING_COUNT: usize = 120;
const PROVINCE: &str = "BC";

const CITIES: [&str; 6] = [
    "Abbotsford",
    "Chilliwack",
    "Mission",
    "Langley",
    "Maple Ridge",
    "Aldergrove",
];
const STREET_NAMES: [&str; 8] = [
    "Cedar Park Pl",
    "Marshall Rd",
    "King Edward St",
    "Old Yale Rd",
    "Gladwin Rd",
    "Fraser Hwy",
    "Clearbrook Rd",
    "Lougheed Hwy",
];
const FEATURES: [&str; 6] = [
    "updated kitchen with quartz counters",
    "fully fenced backyard",
    "mountain views from the primary bedroom",
    "two-bedroom suite with separate entry",
    "double garage and RV parking",
    "walking distance to schools and transit",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo) as f64) as i64
    }
}

struct Listing {
    price: Option<i64>,
    square_footage: i64,
    street: String,
    city: String,
    link: String,
    description: String,
    images: [Option<String>; 4],
}

/// `$1,234,567` formatting, as listing sites print prices.
fn format_price(price: i64) -> String {
    let digits = price.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}

/// Scraped rows without a price carry "N/A".
fn price_text(price: Option<i64>) -> String {
    price.map_or_else(|| "N/A".to_string(), format_price)
}

fn generate(rng: &mut SimpleRng) -> Vec<Listing> {
    (0..LISTING_COUNT)
        .map(|id| {
            let city = CITIES[rng.below(CITIES.len())];
            let square_footage = rng.range(700, 3400) / 10 * 10;
            // ~3% of scraped rows come back without a price
            let price = (rng.next_f64() > 0.03)
                .then(|| (250 * square_footage + rng.range(-60_000, 120_000)) / 100 * 100);
            let image_count = rng.below(5);
            let images = std::array::from_fn(|slot| {
                (slot < image_count)
                    .then(|| format!("https://picsum.photos/seed/listing-{id}-{slot}/640/480"))
            });
            let feature_a = FEATURES[rng.below(FEATURES.len())];
            let feature_b = FEATURES[rng.below(FEATURES.len())];

            Listing {
                price,
                square_footage,
                street: format!(
                    "{} {}",
                    rng.range(1000, 35000),
                    STREET_NAMES[rng.below(STREET_NAMES.len())]
                ),
                city: city.to_string(),
                link: format!("https://www.realtor.ca/real-estate/{}", 26_000_000 + id),
                description: format!(
                    "{square_footage} sq. ft. family home in {city}. Highlights: {feature_a}; {feature_b}."
                ),
                images,
            }
        })
        .collect()
}

/// `listings.csv`, or `listings_1.csv`, `listings_2.csv`, … if taken.
fn next_free_path(stem: &str, ext: &str) -> PathBuf {
    let mut path = PathBuf::from(format!("{stem}.{ext}"));
    let mut counter = 1;
    while path.exists() {
        path = PathBuf::from(format!("{stem}_{counter}.{ext}"));
        counter += 1;
    }
    path
}

const HEADER: [&str; 11] = [
    "Price",
    "Square Footage",
    "Street",
    "City",
    "Province",
    "Link",
    "Description",
    "Image1",
    "Image2",
    "Image3",
    "Image4",
];

fn write_csv(listings: &[Listing], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(HEADER)?;
    for l in listings {
        let price = price_text(l.price);
        let [i1, i2, i3, i4] = l.images.clone().map(Option::unwrap_or_default);
        writer.write_record([
            price,
            l.square_footage.to_string(),
            l.street.clone(),
            l.city.clone(),
            PROVINCE.to_string(),
            l.link.clone(),
            l.description.clone(),
            i1,
            i2,
            i3,
            i4,
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn text_column(listings: &[Listing], value: impl Fn(&Listing) -> Option<String>) -> ArrayRef {
    Arc::new(StringArray::from(listings.iter().map(value).collect::<Vec<_>>()))
}

fn write_parquet(listings: &[Listing], path: &Path) -> Result<()> {
    let mut columns: Vec<ArrayRef> = vec![
        text_column(listings, |l| Some(price_text(l.price))),
        Arc::new(Int64Array::from_iter_values(
            listings.iter().map(|l| l.square_footage),
        )) as ArrayRef,
        text_column(listings, |l| Some(l.street.clone())),
        text_column(listings, |l| Some(l.city.clone())),
        text_column(listings, |_| Some(PROVINCE.to_string())),
        text_column(listings, |l| Some(l.link.clone())),
        text_column(listings, |l| Some(l.description.clone())),
    ];
    for slot in 0..4 {
        columns.push(text_column(listings, |l| l.images[slot].clone()));
    }

    let fields: Vec<Field> = HEADER
        .iter()
        .map(|&name| {
            let data_type = if name == "Square Footage" {
                DataType::Int64
            } else {
                DataType::Utf8
            };
            Field::new(name, data_type, true)
        })
        .collect();

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let listings = generate(&mut rng);

    let csv_path = next_free_path("listings", "csv");
    write_csv(&listings, &csv_path)?;
    println!("Wrote {} listings to {}", listings.len(), csv_path.display());

    let parquet_path = next_free_path("listings", "parquet");
    write_parquet(&listings, &parquet_path)?;
    println!("Wrote {} listings to {}", listings.len(), parquet_path.display());

    Ok(())
}
