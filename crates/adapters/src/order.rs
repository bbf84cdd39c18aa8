use postcord_core::sanitize::strip_tags;
use postcord_core::{ContentKind, Context, EmbedContent, EmbedField, ItemId};
use postcord_format::{Placeholders, decode_entities};

use crate::adapter::{Adapter, Decision, PrepareContext, SkipReason};
use crate::capability::Integration;
use crate::event::{Event, Order, format_money};

/// New store orders, announced once at checkout.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderAdapter;

/// Convert a formatted address (`<br/>`-separated) to plain lines.
fn address_lines(address: &str) -> String {
    let text = address
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n");
    decode_entities(&strip_tags(&text)).trim().to_owned()
}

fn with_via(amount: String, via: &str) -> String {
    let via = strip_tags(via);
    if via.trim().is_empty() {
        amount
    } else {
        format!("{amount} via {}", via.trim())
    }
}

impl OrderAdapter {
    fn placeholders(order: &Order) -> Placeholders {
        Placeholders::new()
            .with("order_number", strip_tags(&order.number))
            .with("order_customer", order.customer.as_str())
            .with("order_total", format_money(order.total, &order.currency))
    }

    fn embed(order: &Order) -> EmbedContent {
        let currency = order.currency.as_str();
        let mut embed = EmbedContent::new()
            .with_title(format!("Order #{}", strip_tags(&order.number)))
            .with_timestamp(order.date.to_rfc3339())
            .with_author(order.customer.as_str());
        if !order.edit_url.is_empty() {
            embed = embed.with_url(order.edit_url.as_str());
        }

        let count = order.item_count();
        if count > 0 {
            let summary = if count == 1 {
                "Your customer purchased the following item.".to_owned()
            } else {
                format!("Your customer purchased the following {count} items.")
            };
            embed.push_field(EmbedField::new("Order Summary", summary));
            for item in &order.items {
                embed.push_field(EmbedField::inline(
                    item.name.as_str(),
                    format!("\u{d7}{}", item.quantity),
                ));
            }
        }

        embed.push_field(EmbedField::new(
            "Totals",
            "The order totals, including shipping costs and taxes, if any.",
        ));
        if order.needs_shipping {
            embed.push_field(EmbedField::inline(
                "Shipping Total",
                with_via(format_money(order.shipping_total, currency), &order.shipping_method),
            ));
        }
        if order.total_tax > 0.0 {
            embed.push_field(EmbedField::inline(
                "Taxes Total",
                format_money(order.total_tax, currency),
            ));
        }
        embed.push_field(EmbedField::inline(
            "Total",
            with_via(format_money(order.total, currency), &order.payment_method),
        ));

        embed.push_field(EmbedField::new(
            "Customer Data",
            "These are the billing and shipping details of your customer.",
        ));
        let billing = address_lines(&order.billing_address);
        if !billing.is_empty() {
            let value = [billing.as_str(), order.billing_email.trim(), order.billing_phone.trim()]
                .into_iter()
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            embed.push_field(EmbedField::inline("Billing Address", value));
        }
        let shipping = address_lines(&order.shipping_address);
        if !shipping.is_empty() {
            embed.push_field(EmbedField::inline("Shipping Address", shipping));
        }
        embed
    }
}

impl Adapter for OrderAdapter {
    fn integration(&self) -> Integration {
        Integration::WooCommerceOrders
    }

    fn context(&self) -> Context {
        ContentKind::Order.context()
    }

    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision {
        let Event::OrderCreated(order) = event else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };

        let allowed = &cx.settings().integrations.allowed_order_statuses;
        if !allowed.iter().any(|status| status == &order.status) {
            return Decision::Skip(SkipReason::StatusNotAllowed(order.status.clone()));
        }

        let content = cx
            .formatter
            .content(ContentKind::Order, &Self::placeholders(order));
        let embed = if cx.formatter.embeds_enabled() {
            Self::embed(order)
        } else {
            EmbedContent::new()
        };

        cx.notify(self.context(), content, embed, ItemId::NONE)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use postcord_core::{NoopHooks, Settings};
    use postcord_format::Formatter;

    use super::*;
    use crate::event::LineItem;

    fn order() -> Order {
        Order {
            id: 5,
            number: "1042".into(),
            status: "processing".into(),
            customer: "John Doe".into(),
            total: 27.5,
            currency: "$".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 5, 14, 0, 0).unwrap(),
            edit_url: "https://shop.test/wp-admin/post.php?post=5&action=edit".into(),
            items: vec![
                LineItem { name: "Mug".into(), quantity: 2 },
                LineItem { name: "Tee".into(), quantity: 1 },
            ],
            needs_shipping: true,
            shipping_total: 5.0,
            shipping_method: "Flat rate".into(),
            total_tax: 2.5,
            payment_method: "Card".into(),
            billing_address: "John Doe<br/>1 Main St<br/>Springfield".into(),
            billing_email: "john@example.com".into(),
            billing_phone: "555-0100".into(),
            shipping_address: String::new(),
        }
    }

    fn prepare(toml: &str, order: Order) -> Decision {
        let formatter = Formatter::new(Arc::new(Settings::from_toml(toml).unwrap()));
        let cx = PrepareContext {
            formatter: &formatter,
            hooks: &NoopHooks,
            now: Utc.with_ymd_and_hms(2024, 3, 5, 14, 1, 0).unwrap(),
            already_sent: false,
        };
        OrderAdapter.prepare(&Event::OrderCreated(order), &cx)
    }

    #[test]
    fn order_content_and_context() {
        let decision = prepare("", order());
        let notification = decision.notification().unwrap();
        assert_eq!(notification.context.as_str(), "order");
        assert_eq!(notification.item, ItemId::NONE);
        assert_eq!(
            notification.content,
            "Order #1042 by John Doe has been created. The order total is $27.50."
        );
    }

    #[test]
    fn order_embed_fields() {
        let decision = prepare("", order());
        let embed = &decision.notification().unwrap().embed;
        assert_eq!(embed.title.as_deref(), Some("Order #1042"));
        assert_eq!(embed.author.as_deref(), Some("John Doe"));

        let fields: Vec<(&str, &str)> = embed
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            fields,
            [
                ("Order Summary", "Your customer purchased the following 3 items."),
                ("Mug", "\u{d7}2"),
                ("Tee", "\u{d7}1"),
                ("Totals", "The order totals, including shipping costs and taxes, if any."),
                ("Shipping Total", "$5.00 via Flat rate"),
                ("Taxes Total", "$2.50"),
                ("Total", "$27.50 via Card"),
                ("Customer Data", "These are the billing and shipping details of your customer."),
                ("Billing Address", "John Doe\n1 Main St\nSpringfield\njohn@example.com\n555-0100"),
            ]
        );
    }

    #[test]
    fn disallowed_status_is_skipped() {
        let mut pending = order();
        pending.status = "pending".into();
        assert_eq!(
            prepare("", pending),
            Decision::Skip(SkipReason::StatusNotAllowed("pending".into()))
        );
    }

    #[test]
    fn allowed_statuses_are_configurable() {
        let toml = "[integrations]\nallowed_order_statuses = [\"pending\"]";
        let mut pending = order();
        pending.status = "pending".into();
        assert!(prepare(toml, pending).notification().is_some());
        assert!(prepare(toml, order()).notification().is_none());
    }
}
