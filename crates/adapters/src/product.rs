use postcord_core::sanitize::strip_tags;
use postcord_core::{ContentKind, Context, EmbedContent, EmbedField, ItemId};
use postcord_format::{Placeholders, decode_entities};

use crate::adapter::{Adapter, Decision, PrepareContext, SkipReason};
use crate::capability::Integration;
use crate::event::{Event, Product, format_money};
use crate::post::join_terms;

/// Store products, announced once when first saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductAdapter;

impl ProductAdapter {
    fn placeholders(product: &Product) -> Placeholders {
        Placeholders::new()
            .with("title", product.name.as_str())
            .with("url", decode_entities(&product.url))
            .with("price", format_money(product.price, &product.currency))
    }

    fn embed(product: &Product) -> EmbedContent {
        let mut embed = EmbedContent::new()
            .with_title(decode_entities(&product.name))
            .with_description(decode_entities(strip_tags(&product.short_description).trim()))
            .with_url(product.url.as_str())
            .with_timestamp(product.date.to_rfc3339());
        if let Some(image) = &product.image {
            embed = embed.with_image(image.as_str());
        }

        if !product.sku.trim().is_empty() {
            embed.push_field(EmbedField::new("SKU", product.sku.trim()));
        }
        if product.regular_price > 0.0 {
            embed.push_field(EmbedField::inline(
                "Regular Price",
                format_money(product.regular_price, &product.currency),
            ));
        }
        if let Some(sale) = product.sale_price.filter(|_| product.is_on_sale()) {
            embed.push_field(EmbedField::inline(
                "Sale Price",
                format_money(sale, &product.currency),
            ));
        }
        if !product.is_virtual {
            if !product.dimensions.trim().is_empty() {
                embed.push_field(EmbedField::inline(
                    "Dimensions",
                    decode_entities(&strip_tags(&product.dimensions)),
                ));
            }
            if !product.weight.trim().is_empty() {
                embed.push_field(EmbedField::inline(
                    "Weight",
                    decode_entities(&strip_tags(&product.weight)),
                ));
            }
        }
        if let Some(value) = join_terms(&product.categories) {
            embed.push_field(EmbedField::new("Categories", value));
        }
        if let Some(value) = join_terms(&product.tags) {
            embed.push_field(EmbedField::new("Tags", value));
        }
        embed
    }
}

impl Adapter for ProductAdapter {
    fn integration(&self) -> Integration {
        Integration::WooCommerceProducts
    }

    fn context(&self) -> Context {
        ContentKind::Product.context()
    }

    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision {
        let Event::ProductSaved(product) = event else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };
        let context = self.context();
        let item = ItemId::new(product.id);

        if let Err(reason) = cx.check_new(&context, item, product.date, product.is_revision) {
            return Decision::Skip(reason);
        }

        let content = cx
            .formatter
            .content(ContentKind::Product, &Self::placeholders(product));
        let embed = if cx.formatter.embeds_enabled() {
            Self::embed(product)
        } else {
            EmbedContent::new()
        };

        cx.notify(context, content, embed, item)
    }
}
