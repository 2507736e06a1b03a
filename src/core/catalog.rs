//! Product catalog business logic.
//!
//! Products are the one collection with a shipped default: a fresh device
//! sees the initial catalog until the admin writes their own. Every mutation
//! follows the store's read-transform-write pattern; deleting a product never
//! touches historical orders, which embed their own copies.

use crate::errors::{Error, Result};
use crate::models::Product;
use crate::store::{self, keys};
use rand::seq::SliceRandom;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// The main sections and their subsections as shown in the shop navigation.
#[must_use]
pub fn category_hierarchy() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            "Escolar",
            vec!["Cuadernos", "Escritura", "Mochilas", "Geometría", "Arte"],
        ),
        (
            "Oficina",
            vec![
                "Papel",
                "Organización",
                "Calculadoras",
                "Mobiliario",
                "Archivadores",
            ],
        ),
        (
            "Tecnología",
            vec!["Accesorios", "Audio", "Cables", "Impresoras"],
        ),
        (
            "Servicios",
            vec!["Impresiones", "Plastificación", "Encuadernación"],
        ),
    ]
}

/// The catalog a fresh device ships with.
#[must_use]
pub fn initial_products() -> Vec<Product> {
    let product = |id: &str,
                   name: &str,
                   price: f64,
                   category: &str,
                   sub_category: &str,
                   brand: &str,
                   description: &str,
                   stock: i64| Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        category: category.to_string(),
        sub_category: sub_category.to_string(),
        brand: brand.to_string(),
        image: String::new(),
        description: description.to_string(),
        stock: Some(stock),
    };

    vec![
        product(
            "1",
            "Resma de Papel 8.5x11",
            350.0,
            "Oficina",
            "Papel",
            "Chamex",
            "Papel bond blanco, 500 hojas, 20lb. El estándar.",
            100,
        ),
        product(
            "2",
            "Folder 8.5x11 Manila (Caja)",
            450.0,
            "Oficina",
            "Archivadores",
            "Generico",
            "Caja de 100 folders color manila tamaño carta.",
            30,
        ),
        product(
            "4",
            "Grapadora Metálica",
            350.0,
            "Oficina",
            "Organización",
            "Bostitch",
            "Grapadora resistente para oficina.",
            15,
        ),
        product(
            "6",
            "Calculadora de Mesa",
            850.0,
            "Oficina",
            "Calculadoras",
            "Casio",
            "Pantalla grande 12 dígitos.",
            25,
        ),
        product(
            "8",
            "Cuaderno 200 Páginas",
            125.0,
            "Escolar",
            "Cuadernos",
            "Norma",
            "Cuaderno cosido resistente.",
            200,
        ),
        product(
            "9",
            "Caja Lápices Mongol",
            150.0,
            "Escolar",
            "Escritura",
            "Mongol",
            "Caja de 12 lápices #2.",
            100,
        ),
        product(
            "10",
            "Juego de Geometría",
            85.0,
            "Escolar",
            "Geometría",
            "Maped",
            "Regla, escuadra y transportador.",
            50,
        ),
        product(
            "12",
            "Mochila Totto",
            2500.0,
            "Escolar",
            "Mochilas",
            "Totto",
            "Mochila resistente con garantía.",
            10,
        ),
        product(
            "13",
            "Caja Colores 12u",
            200.0,
            "Escolar",
            "Arte",
            "Crayola",
            "Colores vibrantes no tóxicos.",
            40,
        ),
        product(
            "14",
            "Memoria USB 32GB",
            450.0,
            "Tecnología",
            "Accesorios",
            "Kingston",
            "Almacenamiento rápido.",
            25,
        ),
        product(
            "15",
            "Mouse Inalámbrico",
            350.0,
            "Tecnología",
            "Accesorios",
            "Logitech",
            "Batería de larga duración.",
            15,
        ),
    ]
}

/// Returns all catalog products, falling back to the shipped catalog when the
/// key has never been written (or its blob is unreadable).
pub async fn get_products(db: &DatabaseConnection) -> Result<Vec<Product>> {
    Ok(store::read_value(db, keys::PRODUCTS)
        .await?
        .unwrap_or_else(initial_products))
}

/// Persists the shipped catalog if the products key has never been written.
/// Called once at startup so later admin edits start from the real list.
pub async fn seed_initial_products(db: &DatabaseConnection) -> Result<()> {
    let existing: Option<Vec<Product>> = store::read_value(db, keys::PRODUCTS).await?;
    if existing.is_none() {
        let catalog = initial_products();
        store::write_value(db, keys::PRODUCTS, &catalog).await?;
        info!("Seeded initial catalog with {} products", catalog.len());
    }
    Ok(())
}

/// Adds a new product to the catalog after validating name and price.
#[instrument(skip(db, product))]
pub async fn add_product(db: &DatabaseConnection, product: Product) -> Result<()> {
    validate(&product)?;

    let mut products = get_products(db).await?;
    products.push(product);
    store::write_value(db, keys::PRODUCTS, &products).await
}

/// Replaces the product with the same id. Unknown ids are a no-op, matching
/// the last-writer-wins model of the store.
#[instrument(skip(db, product))]
pub async fn update_product(db: &DatabaseConnection, product: Product) -> Result<()> {
    validate(&product)?;

    let products: Vec<Product> = get_products(db)
        .await?
        .into_iter()
        .map(|p| if p.id == product.id { product.clone() } else { p })
        .collect();
    store::write_value(db, keys::PRODUCTS, &products).await
}

/// Removes a product from the catalog. Orders that embedded it keep their
/// snapshot copies.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<()> {
    let products: Vec<Product> = get_products(db)
        .await?
        .into_iter()
        .filter(|p| p.id != id)
        .collect();
    store::write_value(db, keys::PRODUCTS, &products).await
}

/// Returns the catalog in a random order for the discovery feed.
pub async fn discovery_feed(db: &DatabaseConnection) -> Result<Vec<Product>> {
    let mut products = get_products(db).await?;
    products.shuffle(&mut rand::thread_rng());
    Ok(products)
}

fn validate(product: &Product) -> Result<()> {
    if product.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if product.price < 0.0 {
        return Err(Error::Validation {
            message: "Product price cannot be negative".to_string(),
        });
    }
    Ok(())
}
