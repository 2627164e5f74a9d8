// All LLM prompt constants for the prompting module.
//
// Templates carry two placeholders: `[Product]` (substituted from config) and
// `{category}` (the analysis theme, follow-up chain only). The caller's
// orchestrator runs the actual model calls; this service only assembles text.

/// Step-1 template for the education / communication theme. Row JSON for the
/// theme is appended below the template.
pub const INITIAL_EDUCATION_PROMPT: &str = r#"Analyze the insight to identify specific knowledge and communication gaps:

**Focus Areas:**
- **Clinical Knowledge:** What evidence, mechanisms, or protocols are misunderstood or missing?
- **Practical Application:** What barriers exist in translating knowledge to practice?
- **Communication:** Which channels, timing, or trusted sources aren't being leveraged?
- **Context:** What system, competitive, or patient population factors are overlooked?

**For Each Gap:**
- Provide supporting quotes from the insight
- Distinguish between explicit (stated) and implicit (inferred) gaps
- Assess impact on clinical decision-making
- Consider how stakeholder tier/therapeutic area amplifies the gap

**Key Questions:** What assumptions reveal knowledge deficits? What language suggests incomplete understanding? How does timing affect gap relevance?

Format your response as:
[PROMPT 1]
[Copy this entire prompt here]

[PROMPT 1 OUTPUT]
[Your analysis here]

The data is below:
"#;

/// Step-1 template for the clinical practice theme.
pub const INITIAL_CLINICAL_PROMPT: &str = r#"Analyze the insight to identify clinical knowledge or practice gaps revealed by the healthcare professional:

**Clinical Gap Categories:**
- **Clinical Knowledge:** What uncertainties exist in dosing, mechanisms, contraindications, or clinical evidence?
- **Patient Selection:** What challenges exist in identifying appropriate candidates or risk stratification?
- **Practice Implementation:** What barriers exist in medication administration, monitoring, or workflow integration?
- **Safety Management:** What gaps exist in side-effect recognition, management, or risk mitigation?

**For Each Gap:**
- Provide supporting quotes from the insight
- Distinguish between knowledge deficits vs. practical implementation barriers
- Assess impact on patient care quality and clinical outcomes
- Consider how stakeholder tier/therapeutic area context influences the gap severity

**Evidence Analysis:**
- What clinical uncertainties are explicitly stated vs. implied?
- What practice variations or inconsistencies are suggested?
- How does the timing/context of this insight affect clinical relevance?

Format your response as:
[PROMPT 1]
[Copy this entire prompt here]

[PROMPT 1 OUTPUT]
[Your analysis here]

The data is below:
"#;

/// Step-1 template for the competitive intelligence theme.
pub const INITIAL_COMPETITIVE_PROMPT: &str = r#"Analyze the insight to identify knowledge gaps about [Product]'s positioning versus competitors:

**Competitive Gap Categories:**
- **Efficacy Comparisons:** What misunderstandings exist about relative clinical outcomes, response rates, or durability?
- **Safety Profiles:** What gaps exist in understanding comparative risk-benefit profiles or tolerability?
- **Value Positioning:** What misconceptions about cost-effectiveness, health economics, or overall value exist?
- **Market Perception:** What inaccurate beliefs about [Product]'s place in therapy or competitive advantages persist?

**Competitor Analysis Focus:**
- Which specific competitors are mentioned or implied in comparisons?
- What competitive data or claims are being referenced (accurately or inaccurately)?
- What competitive strengths are being overvalued or [Product] strengths undervalued?
- How do stakeholder perceptions align with or diverge from clinical evidence?

**For Each Gap:**
- Provide supporting quotes from the insight
- Identify whether gaps favor competitors or create neutral confusion
- Assess impact on [Product]'s competitive standing and market access
- Consider how stakeholder tier/therapeutic area affects competitive sensitivity

Format your response as:
[PROMPT 1]
[Copy this entire prompt here]

[PROMPT 1 OUTPUT]
[Your analysis here]

The data is below:
"#;

/// Step 2 of the chain: gaps → stakeholder behaviors.
pub const FOLLOWUP_BEHAVIOR_PROMPT: &str = r#"Based on the {category} gaps identified in the previous step, analyze how they drive stakeholder behaviors and attitudes:

**Behavioral Impact Areas:**
- **Decision-Making:** How do gaps affect treatment choices and clinical algorithms?
- **Risk Perception:** Are they over/under-estimating risks due to incomplete information?
- **Information-Seeking:** What sources are they turning to or avoiding?
- **Communication:** How do gaps affect patient counseling and peer discussions?

**Psychological Factors:**
- What cognitive biases (confirmation, anchoring) are reinforced by gaps?
- What emotional responses (anxiety, overconfidence) stem from uncertainty?
- How does their stakeholder tier influence behavioral intensity?

**Evidence Analysis:**
For each gap, identify:
- Observable behaviors mentioned in the insight
- Predictable behaviors based on the gap
- Whether responses are strong patterns or situational

Format your response as:
[PREVIOUS CONTENT]
[Include all previous prompts and outputs]

[PROMPT 2]
[Copy this entire prompt here]

[PROMPT 2 OUTPUT]
[Your analysis here]"#;

/// Step 3 of the chain: behaviors → unmet needs.
pub const FOLLOWUP_NEEDS_PROMPT: &str = r#"Based on the {category} gaps and behaviors identified in previous steps, identify the underlying unmet needs driving stakeholder gaps and behaviors:

**Need Categories:**
- **Functional:** What clinical capabilities or decision-support tools are missing?
- **Informational:** What evidence depth, comparative data, or contextual knowledge is lacking?
- **Emotional:** What confidence, reassurance, or anxiety reduction is needed?
- **Social:** What peer validation, expert consultation, or institutional support is required?

**Need Prioritization:**
For each need, assess:
- **Urgency:** How quickly must this be addressed?
- **Impact:** How much would meeting this need change behavior?
- **Feasibility:** How realistic is it for Medical Affairs to address?

**Root Cause Analysis:**
- Why have current efforts failed to meet these needs?
- What barriers prevent need fulfillment?
- What incorrect assumptions about stakeholder needs exist?

Format your response as:
[PREVIOUS CONTENT]
[Include all previous prompts and outputs]

[PROMPT 3]
[Copy this entire prompt here]

[PROMPT 3 OUTPUT]
[Your analysis here]"#;

/// Step 4 of the chain: the full analysis → Medical Affairs actions.
pub const FOLLOWUP_ACTIONS_PROMPT: &str = r#"Based on the comprehensive {category} analysis from previous steps, develop specific Medical Affairs actions to close gaps and meet identified needs:

**Action Framework:**
- **Immediate (0-30 days):** Quick wins using existing resources
- **Short-term (1-3 months):** New content, tools, or targeted outreach
- **Long-term (3-12 months):** Strategic changes to approach or capabilities

**For Each Action, Specify:**
- **What:** Precise description of the action
- **Why:** Which gaps/needs it addresses and expected behavioral impact
- **How:** Implementation approach and required resources
- **When:** Timeline and key milestones
- **Success:** How effectiveness will be measured

**Implementation Requirements:**
- Personnel and budget needs
- Cross-functional collaboration required
- Risk mitigation strategies
- Scalability for similar stakeholder challenges

Format your response as:
[PREVIOUS CONTENT]
[Include all previous prompts and outputs]

[PROMPT 4]
[Copy this entire prompt here]

[PROMPT 4 OUTPUT]
[Your analysis here]"#;
