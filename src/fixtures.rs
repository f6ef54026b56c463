//! Sample content shared by every component.
//!
//! The demo site shows the same posts, products and people in several
//! places, so they live here once instead of being repeated per component.

use crate::money::Money;

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: u32,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    /// ISO date (`YYYY-MM-DD`), so string order is date order
    pub date: &'static str,
    pub read_minutes: u32,
    pub icon: &'static str,
    pub views: u32,
    pub trending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub price: Money,
    pub sale_price: Option<Money>,
    /// Rating in tenths of a star (48 = 4.8)
    pub rating: u8,
    pub reviews: u32,
    pub badge: Option<&'static str>,
    pub in_stock: bool,
    pub featured: bool,
}

impl Product {
    pub fn effective_price(&self) -> Money {
        self.sale_price.unwrap_or(self.price)
    }

    pub fn rating_label(&self) -> String {
        format!("{}.{}", self.rating / 10, self.rating % 10)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub rating: u8,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub monthly: Money,
    pub annual: Money,
    pub popular: bool,
    pub features: &'static [&'static str],
    pub cta: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub bio: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    pub label: &'static str,
    pub target: f64,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub decimals: usize,
    pub large: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioItem {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub client: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub year: u16,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub category: &'static str,
}

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "#home"),
    ("About", "#about"),
    ("Services", "#services"),
    ("Portfolio", "#portfolio"),
    ("Contact", "#contact"),
];

pub fn blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: 1,
            title: "Getting Started with TuskPHP: A Complete Guide",
            excerpt: "Learn the fundamentals of TuskPHP and build your first application with our comprehensive beginner's guide.",
            category: "tutorials",
            author: "Sarah Johnson",
            date: "2024-01-15",
            read_minutes: 8,
            icon: "🚀",
            views: 145,
            trending: true,
        },
        BlogPost {
            id: 2,
            title: "Advanced Security Features in TuskPHP 2.0",
            excerpt: "Explore the enhanced security capabilities that make TuskPHP the most secure PHP framework available.",
            category: "news",
            author: "Mike Chen",
            date: "2024-01-12",
            read_minutes: 6,
            icon: "🔒",
            views: 98,
            trending: true,
        },
        BlogPost {
            id: 3,
            title: "10 Performance Tips for Lightning-Fast Applications",
            excerpt: "Optimize your TuskPHP applications with these proven performance enhancement techniques.",
            category: "tips",
            author: "Alex Rodriguez",
            date: "2024-01-10",
            read_minutes: 12,
            icon: "⚡",
            views: 203,
            trending: false,
        },
        BlogPost {
            id: 4,
            title: "Community Spotlight: Amazing Projects Built with TuskPHP",
            excerpt: "Discover incredible projects created by our talented community members and get inspired.",
            category: "community",
            author: "Lisa Wang",
            date: "2024-01-08",
            read_minutes: 5,
            icon: "🌟",
            views: 76,
            trending: false,
        },
        BlogPost {
            id: 5,
            title: "Building RESTful APIs with TuskPHP",
            excerpt: "Master the art of creating robust and scalable APIs using TuskPHP's powerful features.",
            category: "tutorials",
            author: "David Kim",
            date: "2024-01-05",
            read_minutes: 15,
            icon: "🔌",
            views: 167,
            trending: true,
        },
        BlogPost {
            id: 6,
            title: "TuskPHP vs Other Frameworks: A Detailed Comparison",
            excerpt: "See how TuskPHP stacks up against popular PHP frameworks in performance, security, and ease of use.",
            category: "news",
            author: "Emma Thompson",
            date: "2024-01-03",
            read_minutes: 10,
            icon: "📊",
            views: 189,
            trending: false,
        },
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: "wireless-headphones",
            name: "Premium Wireless Headphones",
            category: "electronics",
            price: Money::cents(29999),
            sale_price: Some(Money::cents(24999)),
            rating: 48,
            reviews: 234,
            badge: Some("Sale"),
            in_stock: true,
            featured: true,
        },
        Product {
            id: "smart-watch",
            name: "Smart Fitness Watch",
            category: "electronics",
            price: Money::cents(19999),
            sale_price: None,
            rating: 46,
            reviews: 156,
            badge: Some("New"),
            in_stock: true,
            featured: false,
        },
        Product {
            id: "laptop-bag",
            name: "Professional Laptop Bag",
            category: "accessories",
            price: Money::cents(8999),
            sale_price: None,
            rating: 44,
            reviews: 89,
            badge: None,
            in_stock: true,
            featured: false,
        },
        Product {
            id: "gaming-mouse",
            name: "Gaming Mouse RGB",
            category: "electronics",
            price: Money::cents(7999),
            sale_price: Some(Money::cents(5999)),
            rating: 47,
            reviews: 312,
            badge: Some("Sale"),
            in_stock: false,
            featured: true,
        },
        Product {
            id: "phone-case",
            name: "Protective Phone Case",
            category: "accessories",
            price: Money::cents(2499),
            sale_price: None,
            rating: 42,
            reviews: 67,
            badge: None,
            in_stock: true,
            featured: false,
        },
        Product {
            id: "bluetooth-speaker",
            name: "Portable Bluetooth Speaker",
            category: "electronics",
            price: Money::cents(14999),
            sale_price: None,
            rating: 45,
            reviews: 203,
            badge: Some("Popular"),
            in_stock: true,
            featured: false,
        },
    ]
}

pub fn cart_products() -> Vec<CartProduct> {
    vec![
        CartProduct {
            id: 1,
            name: "TuskPHP Pro License",
            category: "Software",
            icon: "🐘",
            price: Money::cents(9999),
        },
        CartProduct {
            id: 2,
            name: "Developer Toolkit",
            category: "Tools",
            icon: "🛠️",
            price: Money::cents(4999),
        },
        CartProduct {
            id: 3,
            name: "Premium Support",
            category: "Support",
            icon: "🎯",
            price: Money::cents(2999),
        },
        CartProduct {
            id: 4,
            name: "Custom Theme Pack",
            category: "Themes",
            icon: "🎨",
            price: Money::cents(1999),
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            name: "Sarah Mitchell",
            role: "CEO & Founder",
            company: "TechVision Inc.",
            rating: 5,
            text: "This platform has completely transformed our business operations. The intuitive interface, powerful features, and exceptional support have exceeded all our expectations.",
        },
        Testimonial {
            name: "Michael Rodriguez",
            role: "Head of Operations",
            company: "Global Logistics Pro",
            rating: 5,
            text: "Outstanding service and incredible results! The implementation was seamless, and the ROI was visible within the first month.",
        },
        Testimonial {
            name: "Dr. Emily Chen",
            role: "Research Director",
            company: "Medical Innovations Lab",
            rating: 5,
            text: "The level of customization and flexibility is remarkable. We were able to adapt the platform to our specific research workflows without any compromise.",
        },
        Testimonial {
            name: "James Anderson",
            role: "Creative Director",
            company: "Design Studio Collective",
            rating: 5,
            text: "As a creative agency, we needed a solution that could keep up with our fast-paced environment. The collaboration features are game-changing for our team.",
        },
    ]
}

pub fn faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            title: "🚀 Getting Started with TuskPHP",
            body: "This framework is designed to make web development fast, secure, and enjoyable. Install it, scaffold a project and you are serving pages in minutes.",
        },
        FaqEntry {
            title: "🔒 Security Features",
            body: "SQL injection protection, CSRF tokens, XSS prevention and secure authentication are enabled by default.",
        },
        FaqEntry {
            title: "⚡ Performance Optimization",
            body: "Built-in caching, lazy loading and an optimized router keep response times low under load.",
        },
        FaqEntry {
            title: "🛠️ Developer Tools",
            body: "A command line interface, debugging tools and a testing framework ship with every install.",
        },
        FaqEntry {
            title: "📞 Support & Community",
            body: "Documentation, a community forum, video tutorials and premium support are available.",
        },
    ]
}

pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "starter",
            name: "Starter",
            description: "Perfect for individuals and small projects",
            monthly: Money::dollars(9),
            annual: Money::dollars(90),
            popular: false,
            features: &[
                "5 Projects",
                "10GB Storage",
                "Email Support",
                "Basic Analytics",
                "SSL Certificate",
                "Mobile App Access",
            ],
            cta: "Start Free Trial",
        },
        Plan {
            id: "professional",
            name: "Professional",
            description: "Best for growing businesses and teams",
            monthly: Money::dollars(29),
            annual: Money::dollars(290),
            popular: true,
            features: &[
                "Unlimited Projects",
                "100GB Storage",
                "Priority Support",
                "Advanced Analytics",
                "SSL Certificate",
                "Mobile App Access",
                "Team Collaboration",
                "Custom Branding",
                "API Access",
            ],
            cta: "Get Started",
        },
        Plan {
            id: "enterprise",
            name: "Enterprise",
            description: "For large organizations with advanced needs",
            monthly: Money::dollars(99),
            annual: Money::dollars(990),
            popular: false,
            features: &[
                "Everything in Professional",
                "Unlimited Storage",
                "24/7 Phone Support",
                "White Label Solution",
                "Custom Integrations",
                "Dedicated Account Manager",
                "SLA Guarantee",
            ],
            cta: "Contact Sales",
        },
    ]
}

pub fn team() -> Vec<TeamMember> {
    vec![
        TeamMember {
            name: "Sarah Johnson",
            role: "CEO & Founder",
            bio: "Visionary leader with 15+ years of experience in tech innovation.",
        },
        TeamMember {
            name: "Michael Chen",
            role: "CTO",
            bio: "Full-stack architect who leads our engineering team with expertise in scalable systems.",
        },
        TeamMember {
            name: "Emily Rodriguez",
            role: "Head of Design",
            bio: "Creative designer focused on user experience and interface design.",
        },
        TeamMember {
            name: "David Thompson",
            role: "Product Manager",
            bio: "Product strategist who drives development from conception to launch.",
        },
        TeamMember {
            name: "Lisa Wang",
            role: "Lead Developer",
            bio: "Senior developer passionate about clean code and mentoring.",
        },
        TeamMember {
            name: "James Miller",
            role: "Marketing Director",
            bio: "Growth-focused marketer with expertise in digital campaigns.",
        },
    ]
}

pub fn counters() -> Vec<CounterSpec> {
    let spec = |label, target, prefix, suffix, decimals, large| CounterSpec {
        label,
        target,
        prefix,
        suffix,
        decimals,
        large,
    };
    vec![
        spec("Happy Customers", 15_000.0, "", "+", 0, false),
        spec("Uptime", 99.9, "", "%", 1, false),
        spec("Response Time", 250.0, "<", "ms", 0, false),
        spec("Countries", 50.0, "", "+", 0, false),
        spec("API Calls/Month", 1_000_000.0, "", "+", 0, true),
        spec("Support", 24.0, "", "/7", 0, false),
    ]
}

pub fn tabs() -> Vec<TabSpec> {
    vec![
        TabSpec {
            id: "overview",
            title: "Overview",
            heading: "Product Overview",
            body: "Everything you need to launch, run and grow a modern web application.",
        },
        TabSpec {
            id: "features",
            title: "Features",
            heading: "Powerful Features",
            body: "Routing, templating, an ORM and security tooling out of the box.",
        },
        TabSpec {
            id: "pricing",
            title: "Pricing",
            heading: "Flexible Pricing Plans",
            body: "Start free and upgrade as your team grows.",
        },
        TabSpec {
            id: "reviews",
            title: "Reviews",
            heading: "What Our Customers Say",
            body: "Thousands of teams ship faster with us every day.",
        },
        TabSpec {
            id: "support",
            title: "Support",
            heading: "Get Help When You Need It",
            body: "Documentation, community forums and 24/7 premium support.",
        },
    ]
}

pub fn features() -> Vec<Feature> {
    vec![
        Feature {
            icon: "🛡️",
            title: "Secure by Default",
            description: "Protection against the common web vulnerabilities without extra setup.",
        },
        Feature {
            icon: "⚡",
            title: "Lightning Fast",
            description: "Optimized routing and caching for sub-millisecond overhead.",
        },
        Feature {
            icon: "🧩",
            title: "Modular",
            description: "Drop-in components for every section of your site.",
        },
        Feature {
            icon: "📱",
            title: "Responsive",
            description: "Every component adapts from phones to wide screens.",
        },
    ]
}

pub fn portfolio() -> Vec<PortfolioItem> {
    vec![
        PortfolioItem {
            id: "ecommerce-platform",
            title: "E-commerce Platform",
            category: "web-development",
            client: "RetailTech Inc.",
            description: "A storefront with real-time inventory and secure payment processing.",
            technologies: &["React", "Node.js", "MongoDB", "Stripe"],
            year: 2024,
            featured: true,
        },
        PortfolioItem {
            id: "mobile-banking-app",
            title: "Mobile Banking App",
            category: "mobile-development",
            client: "SecureBank",
            description: "Banking on the go with biometric sign-in and instant transfers.",
            technologies: &["React Native", "TypeScript", "Firebase"],
            year: 2024,
            featured: false,
        },
        PortfolioItem {
            id: "healthcare-dashboard",
            title: "Healthcare Dashboard",
            category: "web-development",
            client: "MedCare Solutions",
            description: "Patient records and analytics for clinics in one dashboard.",
            technologies: &["Vue.js", "Python", "PostgreSQL"],
            year: 2023,
            featured: true,
        },
        PortfolioItem {
            id: "brand-identity",
            title: "Brand Identity Design",
            category: "design",
            client: "StartupCo",
            description: "Logo, typography and brand guidelines for a fintech startup.",
            technologies: &["Figma", "Illustrator", "InDesign"],
            year: 2023,
            featured: false,
        },
        PortfolioItem {
            id: "fitness-tracker",
            title: "Fitness Tracking App",
            category: "mobile-development",
            client: "FitLife",
            description: "Workout logging, goals and progress charts synced across devices.",
            technologies: &["Flutter", "Dart", "Firebase"],
            year: 2023,
            featured: false,
        },
        PortfolioItem {
            id: "learning-platform",
            title: "Online Learning Platform",
            category: "web-development",
            client: "EduTech Pro",
            description: "Courses, quizzes and video lessons for thousands of students.",
            technologies: &["Angular", "Node.js", "MySQL", "AWS"],
            year: 2024,
            featured: true,
        },
    ]
}

pub fn search_entries() -> Vec<SearchEntry> {
    vec![
        SearchEntry {
            title: "Web Development Services",
            description: "Professional web development with modern technologies and best practices.",
            url: "/services/web-development",
            category: "services",
        },
        SearchEntry {
            title: "Mobile App Development",
            description: "Native and cross-platform mobile applications for iOS and Android.",
            url: "/services/mobile-apps",
            category: "services",
        },
        SearchEntry {
            title: "UI/UX Design Process",
            description: "Our comprehensive approach to creating user-centered designs.",
            url: "/blog/ui-ux-design-process",
            category: "blog",
        },
        SearchEntry {
            title: "E-commerce Platform",
            description: "Complete e-commerce solution with payment integration.",
            url: "/products/ecommerce-platform",
            category: "products",
        },
        SearchEntry {
            title: "Digital Marketing Strategy",
            description: "Comprehensive digital marketing services to grow your business.",
            url: "/services/digital-marketing",
            category: "services",
        },
        SearchEntry {
            title: "Our Team",
            description: "Meet the talented professionals behind our success.",
            url: "/team",
            category: "team",
        },
    ]
}

pub const SEARCH_SUGGESTIONS: &[&str] = &[
    "Web Development",
    "Mobile Apps",
    "UI/UX Design",
    "Digital Marketing",
    "E-commerce Solutions",
    "SEO Services",
];

pub const CHAT_RESPONSES: &[&str] = &[
    "Thanks for reaching out! Let me help you with that.",
    "I understand your concern. Here's what I can do for you...",
    "That's a great question! Let me provide you with the information.",
    "I'd be happy to assist you with this issue.",
    "Let me check our knowledge base for the best solution.",
    "I'll connect you with a specialist who can help with this specific topic.",
    "Here's a helpful resource that should answer your question:",
    "Would you like me to schedule a call with our technical team?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_ids_are_unique() {
        let posts = blog_posts();
        let mut ids: Vec<u32> = posts.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), posts.len());

        let products = products();
        let mut ids: Vec<&str> = products.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_effective_price_prefers_sale() {
        let products = products();
        assert_eq!(products[0].effective_price(), Money::cents(24999));
        assert_eq!(products[1].effective_price(), Money::cents(19999));
        assert_eq!(products[0].rating_label(), "4.8");
    }
}
