//! Static fallback site configuration and the fixed default copy shared with
//! the resolver's synthesized variant. The fallback must be valid in every
//! section: it is what renders when the backend is unreachable or the
//! process runs without upstream configuration.

use chrono::{Datelike, Local};
use models::view_model::{
    About, Address, Branding, Contact, Footer, Gallery, Hero, HeroButton, Hours, ImageRef, Logo,
    Menu, Navigation, NavItem, ReservationForm, Seo, SiteConfig, Social, Stat, Testimonials, Theme,
    ThemeColors, ThemeFonts,
};

pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1560179707-f14e90ef3623";

pub fn default_theme() -> Theme {
    Theme {
        colors: ThemeColors {
            primary: "#8B4513".into(),
            primary_dark: "#6B3410".into(),
            primary_light: "#A0522D".into(),
            secondary: "#D4AF37".into(),
            accent: "#CD853F".into(),
            background: "#FFFFFF".into(),
            text: "#2C1810".into(),
        },
        fonts: ThemeFonts { heading: "Playfair Display".into(), body: "Inter".into() },
    }
}

pub fn default_hours() -> Hours {
    Hours {
        monday: "9:00 AM - 6:00 PM".into(),
        tuesday: "9:00 AM - 6:00 PM".into(),
        wednesday: "9:00 AM - 6:00 PM".into(),
        thursday: "9:00 AM - 6:00 PM".into(),
        friday: "9:00 AM - 6:00 PM".into(),
        saturday: "10:00 AM - 4:00 PM".into(),
        sunday: "Cerrado".into(),
    }
}

pub fn default_stats() -> Vec<Stat> {
    vec![
        Stat { value: "10+".into(), label: "Años de Experiencia".into() },
        Stat { value: "500+".into(), label: "Clientes Felices".into() },
        Stat { value: "5★".into(), label: "Calificación".into() },
    ]
}

pub fn default_reservation_form() -> ReservationForm {
    ReservationForm {
        title: "Reservar una Cita".into(),
        fields: ["name", "email", "phone", "date", "time", "partySize"]
            .into_iter()
            .map(String::from)
            .collect(),
        submit_button: "Reservar Ahora".into(),
        submitting_button: "Reservando...".into(),
        success_message: "¡Tu cita ha sido reservada exitosamente!".into(),
        error_message: "Error al reservar la cita. Por favor intenta de nuevo.".into(),
    }
}

/// Navigation for a synthesized page: every section the record can fill.
pub fn default_navigation() -> Navigation {
    Navigation {
        items: vec![
            NavItem { text: "Inicio".into(), link: "#hero".into() },
            NavItem { text: "Acerca".into(), link: "#about".into() },
            NavItem { text: "Servicios".into(), link: "#services".into() },
            NavItem { text: "Galería".into(), link: "#gallery".into() },
            NavItem { text: "Contacto".into(), link: "#contact".into() },
        ],
        reserve_button_text: "Reservar Ahora".into(),
    }
}

pub fn copyright_line(owner: &str) -> String {
    format!("© {} {}. Todos los derechos reservados.", Local::now().year(), owner)
}

/// Minimal always-valid configuration used when no live data is available.
pub fn fallback_config() -> SiteConfig {
    SiteConfig {
        branding: Branding {
            name: "Proveedor de Servicios".into(),
            tagline: "Servicio Profesional".into(),
            description: "Servicio de calidad".into(),
            logo: Logo { url: DEFAULT_IMAGE_URL.into(), alt: "Logo".into() },
        },
        theme: default_theme(),
        hero: Hero {
            title: "Bienvenido".into(),
            subtitle: "Servicio Profesional".into(),
            description: "Servicio de calidad".into(),
            background_image: ImageRef { id: DEFAULT_IMAGE_URL.into(), alt: "Hero".into() },
            buttons: vec![HeroButton {
                text: "Contáctanos".into(),
                action: "#contact".into(),
                variant: "primary".into(),
            }],
        },
        about: About {
            title: "Acerca de Nosotros".into(),
            paragraphs: vec!["Brindamos servicio de calidad.".into()],
            stats: vec![
                Stat { value: "10+".into(), label: "Años".into() },
                Stat { value: "500+".into(), label: "Clientes".into() },
                Stat { value: "5★".into(), label: "Calificación".into() },
            ],
        },
        menu: Menu {
            title: "Nuestros Servicios".into(),
            subtitle: "Lo que ofrecemos".into(),
            items: vec![],
        },
        gallery: Gallery {
            title: "Galería".into(),
            subtitle: "Nuestro trabajo".into(),
            images: vec![],
        },
        testimonials: Testimonials {
            title: "Testimonios".into(),
            subtitle: "Lo que dicen nuestros clientes".into(),
            items: vec![],
        },
        contact: Contact {
            title: "Contáctanos".into(),
            subtitle: "Ponte en contacto".into(),
            address: Address {
                street: "".into(),
                city: "".into(),
                state: "".into(),
                zip: "".into(),
                country: "".into(),
            },
            phone: "".into(),
            email: "".into(),
            hours: default_hours(),
            social: Social { instagram: "".into(), facebook: "".into(), twitter: "".into() },
        },
        navigation: Navigation {
            items: vec![
                NavItem { text: "Inicio".into(), link: "#hero".into() },
                NavItem { text: "Servicios".into(), link: "#services".into() },
                NavItem { text: "Contacto".into(), link: "#contact".into() },
            ],
            reserve_button_text: "Reservar".into(),
        },
        footer: Footer {
            about_text: "Proveedor de servicios de calidad".into(),
            copyright_text: format!(
                "© {} Todos los derechos reservados.",
                Local::now().year()
            ),
        },
        reservation_form: ReservationForm {
            title: "Reservar".into(),
            fields: ["name", "email", "phone", "date", "time", "partySize"]
                .into_iter()
                .map(String::from)
                .collect(),
            submit_button: "Reservar".into(),
            submitting_button: "Reservando...".into(),
            success_message: "¡Reserva exitosa!".into(),
            error_message: "Error al reservar.".into(),
        },
        seo: Seo {
            title: "Proveedor de Servicios".into(),
            description: "Servicio profesional de calidad".into(),
            keywords: vec!["servicios".into(), "profesional".into()],
        },
    }
}
